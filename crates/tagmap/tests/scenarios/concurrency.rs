use tagmap::codegen::{FieldMapping, GenerationResult};
use tagmap::model::{RecordType, TypeDescriptor};
use tagmap::{ConverterRegistry, generate};

use crate::common::*;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_shared_types_are_send_and_sync() {
    assert_send_sync::<ConverterRegistry>();
    assert_send_sync::<RecordType>();
    assert_send_sync::<TypeDescriptor>();
    assert_send_sync::<FieldMapping>();
    assert_send_sync::<GenerationResult>();
    assert_send_sync::<tagmap::ir::Routine>();
}

#[test]
fn test_independent_pairs_generate_concurrently() {
    let registry = ConverterRegistry::build([
        converter("IntToString", scalar("int"), scalar("string"), false),
        converter("ParseInt", scalar("string"), scalar("int"), true),
    ])
    .unwrap();
    let pairs: Vec<(RecordType, RecordType)> = (0..8)
        .map(|n| {
            let tag = format!("f{n}");
            (
                from([field("ID", scalar("int"), &tag)]),
                to([field("UUID", scalar("string"), &tag)]),
            )
        })
        .collect();

    let sequential: Vec<GenerationResult> = pairs
        .iter()
        .map(|(source, dest)| generate(source, dest, &home(), &registry).unwrap())
        .collect();
    let concurrent: Vec<GenerationResult> = std::thread::scope(|scope| {
        let handles: Vec<_> = pairs
            .iter()
            .map(|(source, dest)| {
                let registry = &registry;
                scope.spawn(move || generate(source, dest, &home(), registry))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap().unwrap())
            .collect()
    });

    assert_eq!(sequential, concurrent);
}
