mod support;

use ngen_core::{Capability, CapabilityRegistry, CoreError, TargetDescriptor};
use support::{Basin, Forcing, Hidden, Plain};

#[test]
fn type_without_capabilities_is_not_stored() {
    let mut registry = CapabilityRegistry::new();
    registry.register::<Plain>();
    assert!(registry.is_empty());
    assert!(!registry.contains::<Plain>());
    assert!(matches!(registry.capabilities_of::<Plain>(), Err(CoreError::NoRegisteredCapability(name)) if name == "Plain"));
}

#[test]
fn declared_capabilities_are_registered() {
    let mut registry = CapabilityRegistry::new();
    registry.register_descriptors([TargetDescriptor::of::<Basin>(),
                                   TargetDescriptor::of::<Plain>(),
                                   TargetDescriptor::of::<Forcing>()]);

    assert_eq!(registry.len(), 2);
    assert_eq!(registry.capabilities_of::<Basin>().unwrap(),
               vec![Capability::HydrofabricData, Capability::HydrofabricLinkedData]);
    assert_eq!(registry.capabilities_of_name("Forcing").unwrap(),
               vec![Capability::HydrofabricCatchment, Capability::ForcingMetadata]);
    // cada capability declarada aparece en la entrada del tipo
    for d in registry.iter() {
        for c in Capability::ALL {
            assert_eq!(d.implements(c), d.capabilities().contains(&c));
        }
    }
}

#[test]
fn reverse_lookup_and_requirements() {
    let mut registry = CapabilityRegistry::new();
    registry.register::<Basin>().register::<Forcing>().register::<Hidden>();

    let with_data: Vec<_> = registry.types_with_capability(Capability::HydrofabricData)
                                    .into_iter()
                                    .map(|d| d.name())
                                    .collect();
    assert_eq!(with_data, vec!["Basin", "Hidden"]);
    assert!(registry.types_with_capability(Capability::Realization).is_empty());

    let reqs: Vec<_> = registry.requirements().into_iter().collect();
    assert_eq!(reqs,
               vec![Capability::HydrofabricData,
                    Capability::HydrofabricLinkedData,
                    Capability::HydrofabricCatchment,
                    Capability::ForcingMetadata]);
}

#[test]
fn registering_twice_keeps_keys_unique() {
    let mut registry = CapabilityRegistry::new();
    registry.register::<Basin>().register::<Basin>();
    assert_eq!(registry.len(), 1);
}
