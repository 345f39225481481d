use tagmap::model::TypeDescriptor;
use tagmap::{ConverterRegistry, GoPrinter, generate};

use crate::common::*;

#[test]
fn test_fallible_conversions_from_one_source_bind_distinct_names() {
    let registry =
        ConverterRegistry::build([converter("IntToString", scalar("int"), scalar("string"), true)])
            .unwrap();
    let source = from([field("ID", scalar("int"), "id")]);
    let dest = to([
        field("UUID", scalar("string"), "id"),
        field("Key", scalar("string").optional(), "id"),
    ]);

    let result = generate(&source, &dest, &home(), &registry).unwrap();

    assert_eq!(result.field_mappings.len(), 2);
    assert_eq!(
        result.render(&GoPrinter),
        "import (
\t\"example.com/app/converts\"
\t\"fmt\"
)

// ConvertFromToTo convert From by tag map to To by tag map
func ConvertFromToTo(from From) (To, error) {
\tfromUUID, err := converts.IntToString(from.ID)
\tif err != nil {
\t\treturn To{}, fmt.Errorf(\"cannot convert From.ID -> To.UUID: %w\", err)
\t}

\tfromKey, err := converts.IntToString(from.ID)
\tif err != nil {
\t\treturn To{}, fmt.Errorf(\"cannot convert From.ID -> To.Key: %w\", err)
\t}

\treturn To{
\t\tUUID: fromUUID,
\t\tKey:  &fromKey,
\t}, nil
}
"
    );
}

#[test]
fn test_collections_from_one_source_allocate_distinct_names() {
    let registry =
        ConverterRegistry::build([converter("IntToString", scalar("int"), scalar("string"), false)])
            .unwrap();
    let source = from([field("Tags", TypeDescriptor::collection(scalar("int")), "tags")]);
    let dest = to([
        field("Labels", TypeDescriptor::collection(scalar("string")), "tags"),
        field("Names", TypeDescriptor::collection(scalar("string")), "tags"),
    ]);

    let result = generate(&source, &dest, &home(), &registry).unwrap();

    assert_eq!(
        result.render(&GoPrinter),
        "import \"example.com/app/converts\"

// ConvertFromToTo convert From by tag map to To by tag map
func ConvertFromToTo(from From) To {
\tfromLabels := make([]string, len(from.Tags))
\tfor i, item := range from.Tags {
\t\tfromLabels[i] = converts.IntToString(item)
\t}

\tfromNames := make([]string, len(from.Tags))
\tfor i, item := range from.Tags {
\t\tfromNames[i] = converts.IntToString(item)
\t}

\treturn To{
\t\tLabels: fromLabels,
\t\tNames:  fromNames,
\t}
}
"
    );
}
