use tagmap::codegen::Rule;
use tagmap::model::TypeDescriptor;
use tagmap::{ConverterRegistry, GenerationError, GoPrinter, generate};

use crate::common::*;

fn strings() -> TypeDescriptor {
    TypeDescriptor::collection(scalar("string"))
}

fn ints() -> TypeDescriptor {
    TypeDescriptor::collection(scalar("int"))
}

#[test]
fn test_tags_parsed_element_wise() {
    let registry =
        ConverterRegistry::build([converter("ParseInt", scalar("string"), scalar("int"), true)])
            .unwrap();
    let source = from([field("Tags", strings(), "tags")]);
    let dest = to([field("Tags", ints(), "tags")]);

    let result = generate(&source, &dest, &home(), &registry).unwrap();

    assert_eq!(
        result.field_mappings[0].rule,
        Rule::CollectionMapping(Box::new(Rule::ConverterCallWithError))
    );
    assert!(result.returns_error);
    assert_eq!(
        result.render(&GoPrinter),
        "import (
\t\"example.com/app/converts\"
\t\"fmt\"
)

// ConvertFromToTo convert From by tag map to To by tag map
func ConvertFromToTo(from From) (To, error) {
\tfromTags := make([]int, len(from.Tags))
\tfor i, item := range from.Tags {
\t\tres, err := converts.ParseInt(item)
\t\tif err != nil {
\t\t\treturn To{}, fmt.Errorf(\"cannot convert From.Tags -> To.Tags: %w\", err)
\t\t}
\t\tfromTags[i] = res
\t}

\treturn To{
\t\tTags: fromTags,
\t}, nil
}
"
    );
}

#[test]
fn test_nested_collections() {
    let registry =
        ConverterRegistry::build([converter("IntToString", scalar("int"), scalar("string"), false)])
            .unwrap();
    let source = from([field("Grid", TypeDescriptor::collection(ints()), "grid")]);
    let dest = to([field("Grid", TypeDescriptor::collection(strings()), "grid")]);

    let result = generate(&source, &dest, &home(), &registry).unwrap();

    assert!(!result.returns_error);
    assert_eq!(
        result.render(&GoPrinter),
        "import \"example.com/app/converts\"

// ConvertFromToTo convert From by tag map to To by tag map
func ConvertFromToTo(from From) To {
\tfromGrid := make([][]string, len(from.Grid))
\tfor i, item := range from.Grid {
\t\tres := make([]string, len(item))
\t\tfor i1, item1 := range item {
\t\t\tres[i1] = converts.IntToString(item1)
\t\t}
\t\tfromGrid[i] = res
\t}

\treturn To{
\t\tGrid: fromGrid,
\t}
}
"
    );
}

#[test]
fn test_identical_collections_assigned_directly() {
    let registry = ConverterRegistry::default();
    let source = from([field("Tags", strings(), "tags")]);
    let dest = to([field("Labels", strings(), "tags")]);

    let result = generate(&source, &dest, &home(), &registry).unwrap();

    assert_eq!(result.field_mappings[0].rule, Rule::DirectAssignment);
    assert!(result.field_mappings[0].statements.is_empty());
}

#[test]
fn test_missing_element_converter() {
    let registry = ConverterRegistry::default();
    let source = from([field("Tags", strings(), "tags")]);
    let dest = to([field("Tags", ints(), "tags")]);

    assert_eq!(
        generate(&source, &dest, &home(), &registry),
        Err(GenerationError::ConverterNotFound {
            source_field: "From.Tags".to_string(),
            dest_field: "To.Tags".to_string(),
            source_type: "string".to_string(),
            dest_type: "int".to_string(),
        })
    );
}

#[test]
fn test_collection_into_scalar_is_undefined() {
    let registry = ConverterRegistry::default();
    let source = from([field("Tags", strings(), "tags")]);
    let dest = to([field("Tags", scalar("string"), "tags")]);

    assert_eq!(
        generate(&source, &dest, &home(), &registry),
        Err(GenerationError::UndefinedConversionRule {
            source_field: "From.Tags".to_string(),
            dest_field: "To.Tags".to_string(),
        })
    );
}

#[test]
fn test_optional_elements_into_required_elements_are_guarded() {
    let registry = ConverterRegistry::default();
    let source = from([field(
        "Scores",
        TypeDescriptor::collection(scalar("int").optional()),
        "scores",
    )]);
    let dest = to([field("Scores", ints(), "scores")]);

    let result = generate(&source, &dest, &home(), &registry).unwrap();

    assert_eq!(
        result.field_mappings[0].rule,
        Rule::CollectionMapping(Box::new(Rule::NilGuardRequired))
    );
    assert!(result.returns_error);
    assert_eq!(
        result.render(&GoPrinter),
        "import \"errors\"

// ConvertFromToTo convert From by tag map to To by tag map
func ConvertFromToTo(from From) (To, error) {
\tfromScores := make([]int, len(from.Scores))
\tfor i, item := range from.Scores {
\t\tif item == nil {
\t\t\treturn To{}, errors.New(\"cannot convert From.Scores -> To.Scores, field is nil\")
\t\t}
\t\tfromScores[i] = *item
\t}

\treturn To{
\t\tScores: fromScores,
\t}, nil
}
"
    );
}

#[test]
fn test_optional_elements_converted_with_passthrough() {
    let registry =
        ConverterRegistry::build([converter("IntToString", scalar("int"), scalar("string"), false)])
            .unwrap();
    let source = from([field(
        "IDs",
        TypeDescriptor::collection(scalar("int").optional()),
        "ids",
    )]);
    let dest = to([field(
        "IDs",
        TypeDescriptor::collection(scalar("string").optional()),
        "ids",
    )]);

    let result = generate(&source, &dest, &home(), &registry).unwrap();

    assert_eq!(
        result.field_mappings[0].rule,
        Rule::CollectionMapping(Box::new(Rule::OptionalToOptionalConversion))
    );
    assert!(!result.returns_error);
    assert_eq!(
        result.render(&GoPrinter),
        "import \"example.com/app/converts\"

// ConvertFromToTo convert From by tag map to To by tag map
func ConvertFromToTo(from From) To {
\tfromIDs := make([]*string, len(from.IDs))
\tfor i, item := range from.IDs {
\t\tvar res *string
\t\tif item != nil {
\t\t\tresValue := converts.IntToString(*item)
\t\t\tres = &resValue
\t\t}
\t\tfromIDs[i] = res
\t}

\treturn To{
\t\tIDs: fromIDs,
\t}
}
"
    );
}

#[test]
fn test_optional_destination_collection_takes_address() {
    let registry =
        ConverterRegistry::build([converter("IntToString", scalar("int"), scalar("string"), false)])
            .unwrap();
    let source = from([field("C", ints(), "c")]);
    let dest = to([field("C", strings().optional(), "c")]);

    let result = generate(&source, &dest, &home(), &registry).unwrap();

    assert_eq!(
        result.render(&GoPrinter),
        "import \"example.com/app/converts\"

// ConvertFromToTo convert From by tag map to To by tag map
func ConvertFromToTo(from From) To {
\tfromC := make([]string, len(from.C))
\tfor i, item := range from.C {
\t\tfromC[i] = converts.IntToString(item)
\t}

\treturn To{
\t\tC: &fromC,
\t}
}
"
    );
}
