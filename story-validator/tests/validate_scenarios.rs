use story_validator::repair::braces::balance_braces;
use story_validator::repair::jsx_tags::reconcile_tags;
use story_validator::{
    ComponentInventory, Diagnostic, FileKind, RuntimeImport, Validator, ValidatorConfig, repair,
    synthesize_fallback, validate, validate_syntax,
};

const PRIMARY: &str = "@mantine/core";

fn inventory() -> ComponentInventory {
    ComponentInventory::from_names(PRIMARY, ["Button", "Card", "Stack", "Title", "Text"])
}

fn syntax_diags(src: &str) -> Vec<Diagnostic> {
    validate_syntax(src, FileKind::Tsx, Some(&RuntimeImport::react()))
}

#[test]
fn missing_runtime_import_is_inserted() {
    let v = validate("<Button>Click</Button>", &inventory(), PRIMARY, 1);
    assert!(v.is_valid, "{:?}", v.errors);
    assert!(v.errors.is_empty());
    let fixed = v.fixed_code.expect("repaired text");
    assert!(fixed.contains("import React from 'react';"));
    assert_eq!(v.warnings, ["Auto-fixed syntax (runtime-import)"]);
}

#[test]
fn truncated_nested_tags_are_closed_in_lifo_order() {
    let repaired = reconcile_tags("<Card><Card.Section>x");
    assert_eq!(repaired, "<Card><Card.Section>x</Card.Section></Card>");

    let v = validate("<Card><Card.Section>x", &inventory(), PRIMARY, 1);
    assert!(v.is_valid, "{:?}", v.errors);
    let fixed = v.fixed_code.expect("repaired text");
    assert!(fixed.ends_with("<Card><Card.Section>x</Card.Section></Card>"));
    assert!(syntax_diags(&fixed).is_empty());
}

#[test]
fn closing_tags_after_text_are_respected() {
    let src = "import React from 'react';\nimport { Card, Text } from '@mantine/core';\n<Card><Text>hi</Text>";
    let v = validate(src, &inventory(), PRIMARY, 3);
    assert!(v.is_valid, "{:?}", v.errors);
    let fixed = v.fixed_code.expect("repaired text");
    assert!(fixed.ends_with("<Card><Text>hi</Text></Card>"), "{fixed:?}");
    assert_eq!(v.warnings, ["Auto-fixed syntax (jsx-tags)"]);

    assert_eq!(
        reconcile_tags("<Stack><Text>a</Text><Button>b"),
        "<Stack><Text>a</Text><Button>b</Button></Stack>"
    );
}

#[test]
fn hallucinated_component_gets_a_suggestion() {
    let src = "import React from 'react';\n\
               import { Heading } from '@mantine/core';\n\
               \n\
               export const Primary = () => <Heading order={1}>Hi</Heading>;\n";
    let v = validate(src, &inventory(), PRIMARY, 1);
    assert!(!v.is_valid);
    assert_eq!(v.errors.len(), 1);
    assert!(v.errors[0].contains("Did you mean `Title`?"), "{}", v.errors[0]);
    assert!(v.warnings.is_empty());
    assert_eq!(v.fixed_code, None);
}

#[test]
fn other_import_paths_are_not_checked() {
    let v = validate(
        "import { Button } from 'other-lib'; <Button/>",
        &inventory(),
        PRIMARY,
        1,
    );
    assert!(v.is_valid, "{:?}", v.errors);
}

#[test]
fn unclosed_braces_and_string_on_last_line() {
    let src = "const meta = {\n  args: {\n    style: {\n      title: \"Hello";
    let diags = [Diagnostic::error("Syntax error: unexpected end of input", 4, Some(14))];
    let repaired = repair(src, &diags);
    assert!(repaired.starts_with(src), "last line must not be trimmed");
    assert!(repaired.contains("title: \"Hello\""));
    assert!(repaired.ends_with("\n}\n}\n}\n"));

    let with_import = format!("import React from 'react';\n{src}");
    let v = validate(&with_import, &inventory(), PRIMARY, 1);
    assert!(v.is_valid, "{:?}", v.errors);
    assert_eq!(v.warnings, ["Auto-fixed syntax (braces, strings)"]);
}

#[test]
fn empty_input_fails_with_a_single_error() {
    let v = validate("", &inventory(), PRIMARY, 3);
    assert!(!v.is_valid);
    assert_eq!(v.errors.len(), 1);
    assert!(v.errors[0].contains("No JSX content"));
    assert_eq!(v.fixed_code, None);
}

#[test]
fn repair_reaches_a_fixed_point() {
    for src in [
        "<Card><Card.Section>x",
        "import React from 'react';\nconst meta = {\n  title: 'X',\n",
        "<Stack>\n  <Button>Go</Button>\n",
        "<Stack><Text>a</Text><Button>b",
        "<Card>{/* <Foo> goes here */}\n  <Text>hi</Text>",
    ] {
        let mut current = src.to_string();
        for _ in 0..3 {
            let diags = syntax_diags(&current);
            if diags.is_empty() {
                break;
            }
            current = repair(&current, &diags);
        }
        let diags = syntax_diags(&current);
        assert!(diags.is_empty(), "{src:?} -> {current:?}: {diags:?}");
        assert_eq!(repair(&current, &diags), current);
    }
}

#[test]
fn braces_never_remain_under_closed() {
    for src in ["{", "{{{", "a { b } { c", "}{{", "const x = { y: { z: 1 }"] {
        let out = balance_braces(src);
        assert!(out.matches('{').count() <= out.matches('}').count(), "{src:?}");
    }
}

#[test]
fn balanced_markup_passes_through_reconciler() {
    let src = "export const A = () => (\n  <Stack>\n    <Card.Section><Text>a</Text></Card.Section>\n    <br/>\n  </Stack>\n);\n";
    assert_eq!(reconcile_tags(src), src);
}

#[test]
fn validation_is_deterministic() {
    let src = "import { Heading, ButtonStory } from '@mantine/core';\n<Heading>x";
    let a = validate(src, &inventory(), PRIMARY, 2);
    let b = validate(src, &inventory(), PRIMARY, 2);
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn valid_input_is_not_rewritten() {
    let src = "import React from 'react';\n\
               import { Button, Card } from '@mantine/core';\n\
               \n\
               export default { title: 'Demo/Card' };\n\
               \n\
               export const Primary = () => (\n  <Card>\n    <Button variant=\"filled\">Go</Button>\n  </Card>\n);\n";
    let v = validate(src, &inventory(), PRIMARY, 1);
    assert!(v.is_valid, "{:?}", v.errors);
    assert_eq!(v.fixed_code, None);
    assert!(v.warnings.is_empty());
}

#[test]
fn fallback_stories_validate_cleanly() {
    let validator = Validator::new(ValidatorConfig::default()).unwrap();
    for fw in ["react", "vue", "angular", "svelte", "web-components", "unknown"] {
        let code = synthesize_fallback("A \"primary\" button\nwith an icon", "Demo Button", fw);
        let v = validator.validate(&code, &inventory());
        assert!(v.is_valid, "{fw}: {:?}", v.errors);
        assert_eq!(v.fixed_code, None, "{fw}");
    }
}
