//! Rendered output of check reports and token dumps

use analizador::config::{load_defaults, Loader};
use analizador::processor::{
    process_file, process_source, render_report, render_tokens, OutputFormat, ProcessingError,
    ProcessingSpec, RenderOptions,
};
use analizador::{Checker, Verdict};
use insta::assert_snapshot;

fn render(source: &str, format: OutputFormat) -> String {
    let report = Checker::new().check_source(source);
    let options = RenderOptions {
        format,
        ..RenderOptions::default()
    };
    render_report(source, &report, &options).unwrap()
}

#[test]
fn test_text_report_for_accepted_program() {
    let output = render("var int edad;", OutputFormat::Text);
    assert_eq!(output, "La sintaxis es correcta.\n");
}

#[test]
fn test_text_report_interleaves_lexical_and_syntax_errors() {
    let output = render("var int 5;\nvar # asd", OutputFormat::Text);
    assert_snapshot!(output.trim_end(), @r###"
    1:9: Error de sintaxis en token '5' (expected ID)
    2:5: Illegal character '#'
    Se encontraron errores de sintaxis.
    "###);
}

#[test]
fn test_text_report_lists_every_expected_kind() {
    let output = render("var int edad; 7", OutputFormat::Text);
    assert_snapshot!(output.trim_end(), @r###"
    1:15: Error de sintaxis en token '7' (expected one of ID, REPITE)
    Se encontraron errores de sintaxis.
    "###);
}

#[test]
fn test_text_report_without_expected_kinds() {
    let source = "var int edad";
    let report = Checker::new().check_source(source);
    let options = RenderOptions {
        format: OutputFormat::Text,
        show_expected: false,
    };
    let output = render_report(source, &report, &options).unwrap();
    assert_eq!(
        output,
        "1:13: Error de sintaxis en EOF\nSe encontraron errores de sintaxis.\n"
    );
}

#[test]
fn test_text_report_for_blank_text() {
    let output = render("  \n ", OutputFormat::Text);
    assert_eq!(output, "No hay código para verificar.\n");
}

#[test]
fn test_json_report_for_accepted_program() {
    let output = render("var int edad;", OutputFormat::Json);
    assert_snapshot!(output, @r###"
    {
      "verdict": "accepted",
      "accepted": true,
      "message": "La sintaxis es correcta.",
      "template": "declaration",
      "diagnostics": []
    }
    "###);
}

#[test]
fn test_json_report_for_rejected_program() {
    let output = render("var int 5;", OutputFormat::Json);
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["verdict"], "rejected");
    assert_eq!(value["accepted"], false);
    assert!(value["template"].is_null());
    let diagnostic = &value["diagnostics"][0];
    assert_eq!(diagnostic["kind"], "syntax");
    assert_eq!(diagnostic["message"], "Error de sintaxis en token '5'");
    assert_eq!(diagnostic["line"], 1);
    assert_eq!(diagnostic["column"], 9);
    assert_eq!(diagnostic["expected"], serde_json::json!(["ID"]));
}

#[test]
fn test_json_report_omits_expected_for_lexical_errors() {
    let output = render("var int edad;#", OutputFormat::Json);
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    let diagnostic = &value["diagnostics"][0];
    assert_eq!(diagnostic["kind"], "lexical");
    assert_eq!(diagnostic["message"], "Illegal character '#'");
    assert!(diagnostic.get("expected").is_none());
}

#[test]
fn test_yaml_report() {
    let output = render("var asd letras;", OutputFormat::Yaml);
    assert!(output.contains("verdict: accepted"));
    assert!(output.contains("template: declaration"));
    assert!(output.contains("diagnostics: []"));
}

#[test]
fn test_simple_token_dump() {
    let output = render_tokens("var int edad;\nedad = \"x\" @", OutputFormat::Simple).unwrap();
    assert_snapshot!(output.trim_end(), @r###"
    1:1 VAR var
    1:5 INT int
    1:9 ID edad
    1:13 SEMI ;
    2:1 ID edad
    2:6 ASSIGN =
    2:8 DOUBLESTRING "x"
    2:12 ILLEGAL @
    "###);
}

#[test]
fn test_json_token_dump() {
    let output = render_tokens("repite 10", OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value[0]["kind"], "REPITE");
    assert_eq!(value[0]["value"], "repite");
    assert_eq!(value[1]["kind"], "NUMBER");
    assert_eq!(value[1]["value"], 10);
}

#[test]
fn test_process_source_by_spec_string() {
    let config = load_defaults().unwrap();

    let spec = ProcessingSpec::from_string("check-text").unwrap();
    let processed = process_source("var int edad;", &spec, &config).unwrap();
    assert_eq!(processed.output, "La sintaxis es correcta.\n");
    assert_eq!(processed.verdict, Some(Verdict::Accepted));

    let spec = ProcessingSpec::from_string("tokens-simple").unwrap();
    let processed = process_source("hasta", &spec, &config).unwrap();
    assert_eq!(processed.output, "1:1 HASTA hasta\n");
}

#[test]
fn test_process_source_hides_expected_kinds_when_configured() {
    let config = Loader::new()
        .set_override("output.show_expected", false)
        .unwrap()
        .build()
        .unwrap();

    let spec = ProcessingSpec::from_string("check-text").unwrap();
    let processed = process_source("var int 5;", &spec, &config).unwrap();
    assert_snapshot!(processed.output.trim_end(), @r###"
    1:9: Error de sintaxis en token '5'
    Se encontraron errores de sintaxis.
    "###);
}

#[test]
fn test_oversized_number_in_report() {
    let output = render("var int 123456789012345678901234567890;", OutputFormat::Text);
    assert!(output
        .starts_with("1:9: Error de sintaxis en token '123456789012345678901234567890'"));
}

#[test]
fn test_process_file_sample() {
    let config = load_defaults().unwrap();
    let spec = ProcessingSpec::from_string("check-text").unwrap();
    let processed = process_file("samples/050-loop.txt", &spec, &config).unwrap();
    assert_eq!(processed.output, "La sintaxis es correcta.\n");
}

#[test]
fn test_process_missing_file() {
    let config = load_defaults().unwrap();
    let spec = ProcessingSpec::from_string("check-text").unwrap();
    let result = process_file("samples/does-not-exist.txt", &spec, &config);
    assert!(matches!(result, Err(ProcessingError::FileNotFound(_))));
}
