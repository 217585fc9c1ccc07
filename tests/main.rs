use clargs::{ArgumentSpec, HelpRenderer, ParseError, Schema};

fn compiler_schema() -> Schema {
    Schema::new(vec![
        ArgumentSpec::variadic::<String>("inputs")
            .required()
            .help("The source files to compile."),
        ArgumentSpec::option::<String>("output")
            .alias("o")
            .help("Where to write the binary."),
        ArgumentSpec::flag("optimized").alias("O"),
    ])
}

#[test]
fn parse_compiler_command_line() {
    let matches = compiler_schema()
        .parse(&["program", "-o", "c", "-O", "a", "b"])
        .unwrap();

    assert_eq!(
        matches.get::<Vec<String>>("inputs"),
        Some(&vec!["a".to_string(), "b".to_string()])
    );
    assert_eq!(matches.get::<String>("output"), Some(&"c".to_string()));
    assert_eq!(matches.get::<bool>("optimized"), Some(&true));
}

#[test]
fn parse_missing_required() {
    let error = compiler_schema().parse(&["program", "-O"]).unwrap_err();
    assert_eq!(
        error,
        ParseError::MissingArguments(vec!["inputs".to_string()])
    );
}

#[test]
fn render_help() {
    let help = HelpRenderer::new("program").render(&compiler_schema());
    assert!(!help.is_empty());
    assert!(help.starts_with("usage: program"));
}
