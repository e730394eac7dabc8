use crate::scanner::Diagnostic;
use crate::scanner::command::CommandLine;
use crate::schema::{ArgType, CommandSchema};

/// Check one command invocation against the schema.
///
/// Unknown commands and per-argument problems are anchored at the offending
/// token; arity problems span the whole `<<...>>` invocation.
pub fn validate_command(
    schema: &CommandSchema,
    command: &CommandLine<'_>,
    out: &mut Vec<Diagnostic>,
) {
    let Some(name) = command.name() else {
        return;
    };
    let Some(def) = schema.command(name.text) else {
        out.push(Diagnostic::error(
            name.range(command.line),
            format!(r#"Unknown command "{}"."#, name.text),
        ));
        return;
    };

    let args = command.args();

    if let Some(min) = def.min_args.filter(|&min| args.len() < min) {
        let message = if min == 1 {
            format!(r#"Command "{}" takes at least 1 argument."#, name.text)
        } else {
            format!(r#"Command "{}" takes at least {} arguments."#, name.text, min)
        };
        out.push(Diagnostic::error(command.invocation_range(), message));
    }

    if let Some(max) = def.max_args.filter(|&max| args.len() > max) {
        let message = if max == 0 {
            format!(r#"Command "{}" takes no arguments."#, name.text)
        } else {
            format!(r#"Command "{}" takes at most {} arguments."#, name.text, max)
        };
        out.push(Diagnostic::error(command.invocation_range(), message));
    }

    let Some(types) = &def.types else {
        return;
    };
    for (index, (type_name, arg)) in types.iter().zip(args).enumerate() {
        let valid = match schema.resolve_type(type_name) {
            ArgType::Number => is_number(arg.text),
            ArgType::String => true,
            ArgType::Enum(values) => values.iter().any(|v| v == arg.text),
            ArgType::Unknown => {
                out.push(Diagnostic::error(
                    arg.range(command.line),
                    format!(r#"Schema Error: Unknown type "{}""#, type_name),
                ));
                continue;
            }
        };
        if !valid {
            out.push(Diagnostic::error(
                arg.range(command.line),
                format!(
                    r#"Invalid value "{}" for argument {} of type "{}" for "{}"."#,
                    arg.text,
                    index + 1,
                    type_name,
                    name.text
                ),
            ));
        }
    }
}

/// A finite floating-point literal such as `3`, `-0.5` or `1e3`.
fn is_number(text: &str) -> bool {
    text.parse::<f64>().is_ok_and(f64::is_finite)
}
