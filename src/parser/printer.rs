use terminal_size::{terminal_size, Width};

use crate::api::{ArgumentKind, ArgumentSpec, Schema};
use crate::model::Arity;

const FALLBACK_WIDTH: usize = 80;
const INDENT: usize = 2;
const PADDING: usize = 4;

/// Renders usage/help text over a [`Schema`].
///
/// Read-only: the renderer only inspects argument names, aliases, arities,
/// required markers, and help messages.  The parse engine never consults it.
pub struct HelpRenderer {
    program: String,
    width: usize,
}

impl HelpRenderer {
    /// Create a renderer sized to the attached terminal, falling back to 80
    /// columns when no terminal is detected.
    pub fn new(program: impl Into<String>) -> Self {
        let width = if let Some((Width(terminal_width), _)) = terminal_size() {
            terminal_width as usize
        } else {
            FALLBACK_WIDTH
        };

        Self::sized(program, width)
    }

    pub(crate) fn sized(program: impl Into<String>, width: usize) -> Self {
        Self {
            program: program.into(),
            width,
        }
    }

    /// Render the help text: a usage line, then the positional arguments and
    /// options with their aligned help messages.
    /// Non-empty for any program name, schema or no schema.
    pub fn render(&self, schema: &Schema) -> String {
        let mut lines = vec![self.usage_line(schema)];

        let positionals: Vec<&ArgumentSpec> = schema.positionals().collect();
        let options: Vec<&ArgumentSpec> = schema.options().collect();

        if !positionals.is_empty() {
            lines.push(String::default());
            lines.push("arguments:".to_string());
            self.render_section(&mut lines, &positionals);
        }

        if !options.is_empty() {
            lines.push(String::default());
            lines.push("options:".to_string());
            self.render_section(&mut lines, &options);
        }

        lines.join("\n")
    }

    fn usage_line(&self, schema: &Schema) -> String {
        let mut parts = vec![format!("usage: {program}", program = self.program)];

        for spec in schema.options() {
            let summary = option_summary(spec);

            if spec.is_required() {
                parts.push(summary);
            } else {
                parts.push(format!("[{summary}]"));
            }
        }

        for spec in schema.positionals() {
            let meta = spec.name().to_ascii_uppercase();

            match spec.get_arity() {
                Arity::Scalar => parts.push(meta),
                Arity::Range(_, _) => parts.push(format!("{meta} [...]")),
            };
        }

        parts.join(" ")
    }

    fn render_section(&self, lines: &mut Vec<String>, specs: &[&ArgumentSpec]) {
        let left_width = specs
            .iter()
            .map(|spec| label(spec).len())
            .max()
            .unwrap_or(0);

        for spec in specs {
            let left = label(spec);
            let description = match (spec.get_help(), spec.is_required()) {
                (Some(help), true) => format!("{help} (required)"),
                (Some(help), false) => help.to_string(),
                (None, true) => "(required)".to_string(),
                (None, false) => String::default(),
            };

            if description.is_empty() {
                lines.push(format!("{:INDENT$}{left}", ""));
                continue;
            }

            let remaining = self
                .width
                .saturating_sub(INDENT + left_width + PADDING)
                .max(MINIMUM_WRAP_WIDTH);

            for (i, part) in wrap(&description, remaining).into_iter().enumerate() {
                if i == 0 {
                    lines.push(format!("{:INDENT$}{left:left_width$}{:PADDING$}{part}", "", ""));
                } else {
                    lines.push(format!("{:INDENT$}{:left_width$}{:PADDING$}{part}", "", "", ""));
                }
            }
        }
    }
}

fn option_summary(spec: &ArgumentSpec) -> String {
    let marker = match spec.get_alias() {
        Some(alias) => format!("-{alias}"),
        None => format!("--{name}", name = spec.name()),
    };

    match spec.kind() {
        ArgumentKind::Flag => marker,
        _ => format!("{marker} {meta}", meta = spec.name().to_ascii_uppercase()),
    }
}

fn label(spec: &ArgumentSpec) -> String {
    match spec.kind() {
        ArgumentKind::Positional => spec.name().to_string(),
        ArgumentKind::Option | ArgumentKind::Flag => match spec.get_alias() {
            Some(alias) => format!("-{alias}, --{name}", name = spec.name()),
            None => format!("--{name}", name = spec.name()),
        },
    }
}

// Room for roughly three average words per wrapped line.
const MINIMUM_WRAP_WIDTH: usize = 17;

fn wrap(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split(' ') {
        if word.is_empty() {
            continue;
        }

        if current.is_empty() {
            hyphenate(width, &mut lines, &mut current, word);
        } else if current.len() + word.len() + 1 <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(current);
            current = String::default();
            hyphenate(width, &mut lines, &mut current, word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn hyphenate(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    let increment = width - 1;
    let mut left = 0;
    let mut right = increment;

    while right + 1 < word.len() {
        lines.push(format!("{}-", &word[left..right]));
        left += increment;
        right += increment;
    }

    current.push_str(&word[left..]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::assert_contains;

    fn renderer() -> HelpRenderer {
        HelpRenderer::sized("program", 80)
    }

    #[test]
    fn render_empty_schema() {
        let help = renderer().render(&Schema::new(Vec::default()));
        assert_eq!(help, "usage: program");
    }

    #[test]
    fn render_non_empty() {
        let schema = Schema::new(vec![
            ArgumentSpec::variadic::<String>("inputs")
                .required()
                .help("The source files."),
            ArgumentSpec::option::<String>("output")
                .alias("o")
                .help("Where to write the result."),
            ArgumentSpec::flag("optimized").alias("O"),
        ]);
        let help = renderer().render(&schema);

        assert_contains!(help, "usage: program [-o OUTPUT] [-O] INPUTS [...]");
        assert_contains!(help, "arguments:");
        assert_contains!(help, "inputs");
        assert_contains!(help, "The source files. (required)");
        assert_contains!(help, "options:");
        assert_contains!(help, "-o, --output");
        assert_contains!(help, "Where to write the result.");
        assert_contains!(help, "-O, --optimized");
    }

    #[test]
    fn render_required_option_unbracketed() {
        let schema = Schema::new(vec![ArgumentSpec::option::<String>("output").required()]);
        let help = renderer().render(&schema);
        assert_contains!(help, "usage: program --output OUTPUT");
    }

    #[test]
    fn render_wraps_descriptions() {
        let schema = Schema::new(vec![ArgumentSpec::flag("verbose").help(
            "An especially long winded description which cannot possibly fit a single line \
             of the configured width and therefore must wrap.",
        )]);
        let help = HelpRenderer::sized("program", 40).render(&schema);

        let lines: Vec<&str> = help.lines().collect();
        assert!(lines.len() > 4, "expected wrapping in: {help}");
    }

    #[test]
    fn wrap_short() {
        assert_eq!(wrap("something", 23), vec!["something".to_string()]);
        assert_eq!(wrap("  something  ", 23), vec!["something".to_string()]);
    }

    #[test]
    fn wrap_multi_line() {
        assert_eq!(
            wrap("something pieces full more stuff", 23),
            vec!["something pieces full".to_string(), "more stuff".to_string()]
        );
    }

    #[test]
    fn wrap_hyphenates() {
        assert_eq!(
            wrap("somethingxpiecesxfullerandthenwecontinue", 23),
            vec![
                "somethingxpiecesxfulle-".to_string(),
                "randthenwecontinue".to_string(),
            ]
        );
    }
}
