use tagmap::model::{Field, Namespace, TypeDescriptor};
use tagmap::{ConverterRegistry, GenerationError, RegistryError, generate};

use crate::common::*;

#[test]
fn test_ambiguous_converters_rejected_at_build() {
    let first = converter("IntToString", scalar("int"), scalar("string"), false);
    let mut second = converter("Itoa", scalar("int").optional(), scalar("string"), true);
    second.namespace = Some(Namespace::from_path("strconv"));

    let err = ConverterRegistry::build([first, second]).unwrap_err();

    assert_eq!(
        err,
        RegistryError::AmbiguousConverter {
            source_type: "int".to_string(),
            dest_type: "string".to_string(),
            first: "converts.IntToString".to_string(),
            second: "strconv.Itoa".to_string(),
        }
    );
}

#[test]
fn test_missing_tag_names_field() {
    let source = from([Field::new("Name", scalar("string"))]);
    let dest = to([field("Name", scalar("string"), "name")]);

    let err = generate(&source, &dest, &home(), &ConverterRegistry::default()).unwrap_err();

    assert_eq!(
        err,
        GenerationError::MissingTag {
            record: "From".to_string(),
            field: "Name".to_string(),
            key: "map".to_string(),
        }
    );
    assert_eq!(err.to_string(), "field From.Name has no `map` tag");
}

#[test]
fn test_repeated_source_tag_uses_last_field() {
    let source = from([
        field("First", scalar("string"), "name"),
        field("Second", scalar("string"), "name"),
    ]);
    let dest = to([field("Name", scalar("string"), "name")]);

    let result = generate(&source, &dest, &home(), &ConverterRegistry::default()).unwrap();

    assert_eq!(result.field_mappings.len(), 1);
    assert_eq!(result.field_mappings[0].source_field, "Second");
}

#[test]
fn test_first_failing_destination_field_wins() {
    let source = from([
        field("A", scalar("int"), "a"),
        field("B", TypeDescriptor::collection(scalar("int")), "b"),
    ]);
    let dest = to([
        field("B", scalar("int"), "b"),
        field("A", scalar("string"), "a"),
    ]);

    let err = generate(&source, &dest, &home(), &ConverterRegistry::default()).unwrap_err();

    assert_eq!(
        err,
        GenerationError::UndefinedConversionRule {
            source_field: "From.B".to_string(),
            dest_field: "To.B".to_string(),
        }
    );
}

#[test]
fn test_missing_converter_for_scalar_pair() {
    let source = from([field("ID", scalar("int"), "id")]);
    let dest = to([field("UUID", scalar("string").optional(), "id")]);

    let err = generate(&source, &dest, &home(), &ConverterRegistry::default()).unwrap_err();

    assert_eq!(
        err.to_string(),
        "no converter from int to string for From.ID -> To.UUID"
    );
}

#[test]
fn test_optional_converter_result_into_required_field() {
    let registry = ConverterRegistry::build([converter(
        "Lookup",
        scalar("int"),
        scalar("string").optional(),
        false,
    )])
    .unwrap();
    let source = from([field("ID", scalar("int"), "id")]);
    let dest = to([field("UUID", scalar("string"), "id")]);

    assert_eq!(
        generate(&source, &dest, &home(), &registry),
        Err(GenerationError::UndefinedConversionRule {
            source_field: "From.ID".to_string(),
            dest_field: "To.UUID".to_string(),
        })
    );
}
