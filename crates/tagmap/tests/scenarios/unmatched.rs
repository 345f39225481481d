use tagmap::{ConverterRegistry, GoPrinter, generate};

use crate::common::*;

#[test]
fn test_unmatched_destination_field_is_skipped() {
    let registry = ConverterRegistry::default();
    let source = from([field("Name", scalar("string"), "name")]);
    let dest = to([
        field("Name", scalar("string"), "name"),
        field("Extra", scalar("int"), "unmapped"),
    ]);

    let result = generate(&source, &dest, &home(), &registry).unwrap();

    assert_eq!(result.field_mappings.len(), 1);
    assert_eq!(result.field_mappings[0].dest_field, "Name");
    assert!(!result.returns_error);
    assert!(!result.render(&GoPrinter).contains("Extra"));
}

#[test]
fn test_no_matching_fields_yields_empty_routine() {
    let registry = ConverterRegistry::default();
    let source = from([field("Name", scalar("string"), "name")]);
    let dest = to([field("Extra", scalar("int"), "unmapped")]);

    let result = generate(&source, &dest, &home(), &registry).unwrap();

    assert!(result.field_mappings.is_empty());
    assert_eq!(
        result.render(&GoPrinter),
        "// ConvertFromToTo convert From by tag map to To by tag map
func ConvertFromToTo(from From) To {
\treturn To{}
}
"
    );
}
