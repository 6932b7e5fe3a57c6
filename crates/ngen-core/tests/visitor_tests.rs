mod support;

use ngen_core::{Accumulator, Builder, Capability, CoreError, Fulfillment, HookProvider, PairedProvider, Result,
                SchemaVersion, TargetSpec, TargetVisitor, UnitIdVisitor, UnitRecord, Visitable};
use serde_json::json;
use support::{hydrofabric_rows, linked_rows, row, Basin, Forcing};

/// Provider fijo de una unidad, con tag de versión por capability.
struct StubProvider {
    hf_version: &'static str,
    linked_version: &'static str,
}

impl HookProvider for StubProvider {
    fn provided(&self) -> &[Capability] {
        &[Capability::HydrofabricData, Capability::HydrofabricLinkedData]
    }

    fn advance(&mut self) -> Result<bool> {
        Ok(false)
    }

    fn current_unit(&self) -> Option<&str> {
        Some("cat-1")
    }

    fn provide(&self, capability: Capability) -> Result<UnitRecord> {
        let (version, data) = match capability {
            Capability::HydrofabricData => (self.hf_version, json!({"divide_id": "cat-1", "areasqkm": 2.0})),
            _ => (self.linked_version, json!({"divide_id": "cat-1", "elevation_mean": 5.0, "slope_mean": 0.1})),
        };
        Ok(UnitRecord { version: version.into(),
                        unit_id: "cat-1".into(),
                        row: row(data) })
    }
}

#[test]
fn visitor_pulls_declared_capabilities_and_fills_defaults() {
    let mut provider = PairedProvider::with_defaults(hydrofabric_rows(&["cat-1"]), linked_rows(&["cat-1"])).unwrap();
    assert!(provider.advance().unwrap());

    let mut visitor = Box::new(TargetVisitor::<Basin>::new());
    visitor.visit(&provider).unwrap();
    assert_eq!(visitor.accumulator().version(), Some(SchemaVersion::V2));

    let artifact = visitor.build().unwrap();
    let basin = Basin::from_artifact(&artifact).unwrap();
    assert_eq!(basin.divide_id, "cat-1");
    assert_eq!(basin.elevation_m, 100.0);
    assert_eq!(basin.time_step_s, 3600);
}

#[test]
fn explicit_values_beat_baseline_defaults() {
    let provider = StubProvider { hf_version: "2.0", linked_version: "2.0" };
    let mut acc = Accumulator::<Basin>::new();
    acc.pull(&provider, Capability::HydrofabricData).unwrap();
    acc.pull(&provider, Capability::HydrofabricLinkedData).unwrap();
    acc.set("time_step_s", json!(60));
    assert_eq!(acc.finalize().unwrap().time_step_s, 60);
}

#[test]
fn mismatched_versions_within_a_unit_fail() {
    let provider = StubProvider { hf_version: "2.0", linked_version: "2.0.0" };
    let mut visitor = TargetVisitor::<Basin>::new();
    let err = visitor.visit(&provider).unwrap_err();
    assert!(matches!(err, CoreError::UnsupportedSchemaVersion(ref m) if m.contains("mismatched versions")));
}

#[test]
fn unsupported_version_fails() {
    let provider = StubProvider { hf_version: "1.2", linked_version: "1.2" };
    let mut acc = Accumulator::<Basin>::new();
    assert!(matches!(acc.pull(&provider, Capability::HydrofabricData),
                     Err(CoreError::UnsupportedSchemaVersion(_))));
    assert!(acc.version().is_none());
}

#[test]
fn finalize_without_payloads_is_no_data() {
    let acc = Accumulator::<Basin>::new();
    assert!(matches!(acc.finalize(), Err(CoreError::NoData(_))));
}

#[test]
fn finalize_without_a_recorded_version_is_no_data() {
    let mut acc = Accumulator::<Basin>::new();
    acc.push(Fulfillment::create(Capability::HydrofabricData,
                                 UnitRecord { version: "2.0".into(),
                                              unit_id: "cat-1".into(),
                                              row: row(json!({"areasqkm": 2.0})) }).unwrap())
       .unwrap();
    let err = acc.finalize().unwrap_err();
    assert!(matches!(err, CoreError::NoData(ref msg) if msg.contains("schema version")));
}

#[test]
fn pulling_an_undeclared_capability_is_a_mismatch() {
    let provider = StubProvider { hf_version: "2.0", linked_version: "2.0" };
    let mut acc = Accumulator::<Forcing>::new();
    let err = acc.pull(&provider, Capability::HydrofabricData).unwrap_err();
    assert!(matches!(err, CoreError::CapabilityMismatch { ref target, .. } if target == "Forcing"));
}

#[test]
fn visitor_for_target_without_provider_capabilities_has_nothing_to_build() {
    let provider = StubProvider { hf_version: "2.0", linked_version: "2.0" };
    let mut visitor = Box::new(TargetVisitor::<Forcing>::new());
    visitor.visit(&provider).unwrap();
    assert!(matches!(visitor.build(), Err(CoreError::NoData(_))));
}

#[test]
fn identity_visitor_records_the_unit_id() {
    let mut identity = UnitIdVisitor::new();
    assert_eq!(identity.unit_id(), None);
    identity.visit(&StubProvider { hf_version: "2.0", linked_version: "2.0" }).unwrap();
    assert_eq!(identity.unit_id(), Some("cat-1"));

    let mut identity = UnitIdVisitor::new();
    assert!(identity.visit(&StubProvider { hf_version: "3.0", linked_version: "2.0" }).is_err());
}
