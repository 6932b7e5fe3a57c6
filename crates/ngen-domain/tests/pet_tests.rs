use std::fs;

use ngen_core::{build, Builder, Capability, CoreError, DefaultFileWriter, Fulfillment, HookProvider, Orchestrator,
                PairedProvider, Record, SchemaVersion, TargetSpec, TargetVisitor, Visitable};
use ngen_domain::{builtin_registry, Pet, PetMethod};
use serde_json::{json, Value};
use tempfile::tempdir;

fn rows(v: Value) -> Vec<Record> {
    serde_json::from_value(v).unwrap()
}

fn sources() -> (Vec<Record>, Vec<Record>) {
    let hf = rows(json!([
        {"divide_id": "cat-2", "areasqkm": 3.1, "toid": "nex-2"},
        {"divide_id": "cat-1", "areasqkm": 1.4, "toid": "nex-1"}
    ]));
    let linked = rows(json!([
        {"divide_id": "cat-1", "X": -97.5554, "Y": 37.25, "elevation_mean": 303.33},
        {"divide_id": "cat-2", "X": -97.61, "Y": 37.31, "elevation_mean": 298.0}
    ]));
    (hf, linked)
}

#[test]
fn pet_is_registered_with_its_capabilities() {
    let registry = builtin_registry();
    assert_eq!(registry.capabilities_of::<Pet>().unwrap(),
               vec![Capability::HydrofabricLinkedData, Capability::HydrofabricCatchment]);
    assert_eq!(Pet::output_shape().map(|s| s.extension()), Some("ini"));
}

#[test]
fn linked_data_and_v2_defaults_build_a_pet() {
    let (hf, linked) = sources();
    let mut provider = PairedProvider::with_defaults(hf, linked).unwrap();
    assert!(provider.advance().unwrap());

    let mut visitor = Box::new(TargetVisitor::<Pet>::new());
    visitor.visit(&provider).unwrap();
    assert_eq!(visitor.accumulator().version(), Some(SchemaVersion::V2));

    let pet = Pet::from_artifact(&visitor.build().unwrap()).unwrap();
    assert_eq!(provider.current_unit(), Some("cat-1"));
    assert_eq!(pet.latitude_degrees, 37.25);
    assert_eq!(pet.site_elevation_m, 303.33);
    assert_eq!(pet.pet_method, PetMethod::EnergyBalance);
    assert_eq!(pet.num_timesteps, 720);
    assert!(pet.yes_aorc && !pet.yes_wrf);
}

#[test]
fn orchestrated_run_writes_one_ini_per_unit() {
    let (hf, linked) = sources();
    let registry = builtin_registry();
    let dir = tempdir().unwrap();
    let mut writer = DefaultFileWriter::new(dir.path()).unwrap();

    let mut orchestrator = Orchestrator::new(&registry);
    orchestrator.target::<Pet>().unwrap();
    let report = orchestrator.generate([PairedProvider::with_defaults(hf, linked).unwrap()], &mut writer)
                             .unwrap();
    assert_eq!(report.units, 2);

    let ini = fs::read_to_string(dir.path().join("PET_cat-1.ini")).unwrap();
    assert!(ini.starts_with("verbose=true\npet_method=1\n"));
    assert!(ini.contains("latitude_degrees=37.25\n"));
    assert!(ini.contains("longitude_degrees=-97.5554\n"));
    assert!(ini.contains("site_elevation_m=303.33\n"));
    assert!(ini.contains("surface_shortwave_albedo=7.0\n"));
    assert!(dir.path().join("PET_cat-2.ini").is_file());
}

#[test]
fn catchment_metadata_feeds_the_same_fields() {
    let link = Fulfillment::from_link_value(json!({
        "forcing_metadata": {"cetroid_lon": -97.5554, "centroid_lat": 37.25, "elevation": 303.33}
    }))
    .unwrap();
    let pet = build::<Pet>(&[link]).unwrap()
                                   .with_defaults(Pet::baseline_defaults(SchemaVersion::V2))
                                   .with_field("pet_method", json!("penman_monteith"))
                                   .construct()
                                   .unwrap();
    assert_eq!(pet.pet_method, PetMethod::PenmanMonteith);
    assert_eq!(pet.longitude_degrees, -97.5554);
    assert_eq!(pet.time_step_size_s, 3600);
}

#[test]
fn catchment_without_the_metadata_key_is_no_data() {
    let link = Fulfillment::from_link_value(json!({"forcing_metadata": {"centroid_lon": 1.0, "centroid_lat": 2.0}}))
        .unwrap();
    assert!(matches!(build::<Pet>(&[link]), Err(CoreError::NoData(_))));
}

#[test]
fn out_of_range_coordinates_fail_validation() {
    let hf = rows(json!([{"divide_id": "cat-9"}]));
    let linked = rows(json!([{"divide_id": "cat-9", "X": 12.0, "Y": 123.0, "elevation_mean": 1.0}]));
    let mut provider = PairedProvider::with_defaults(hf, linked).unwrap();
    assert!(provider.advance().unwrap());
    assert_eq!(provider.current_unit(), Some("cat-9"));

    let mut visitor = Box::new(TargetVisitor::<Pet>::new());
    visitor.visit(&provider).unwrap();
    let err = visitor.build().unwrap_err();
    assert!(matches!(err, CoreError::Validation { ref target, ref reason } if target == "PET" && reason.contains("latitude_degrees 123 outside")));
}
