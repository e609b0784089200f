use super::argument::ArgumentType;
use crate::commands::error::RegistryError;
use itertools::Itertools;
use std::iter;

/// One positional parameter of a command, as declared by `name:type` or
/// `name:type?`. Declaration order is parsing order.
#[derive(Debug, Clone)]
pub struct ArgSpec {
    pub name: String,
    pub arg_type: ArgumentType,
    pub optional: bool,
}

/// Parses the declaration strings of a command into an ordered `ArgSpec`
/// list. Any failure here is a configuration error: it aborts registration
/// and never reaches a player.
pub(super) fn parse_arg_specs(specs: &[String]) -> Result<Vec<ArgSpec>, RegistryError> {
    let mut parsed: Vec<ArgSpec> = Vec::with_capacity(specs.len());

    for spec in specs {
        let Some((name, type_token)) = spec.split_once(':') else {
            return Err(RegistryError::BadArgumentSpec { spec: spec.clone() });
        };

        let (type_token, optional) = match type_token.strip_suffix('?') {
            Some(token) => (token, true),
            None => (type_token, false),
        };

        if name.is_empty() || type_token.is_empty() {
            return Err(RegistryError::BadArgumentSpec { spec: spec.clone() });
        }

        let Some(arg_type) = ArgumentType::from_token(type_token) else {
            return Err(RegistryError::UnknownArgumentType {
                token: type_token.to_string(),
                spec: spec.clone(),
            });
        };

        // Gap-filling is undefined, so optionals must come last.
        if !optional {
            if let Some(previous) = parsed.iter().find(|arg| arg.optional) {
                return Err(RegistryError::OptionalBeforeRequired {
                    optional: previous.name.clone(),
                    required: name.to_string(),
                });
            }
        }

        parsed.push(ArgSpec {
            name: name.to_string(),
            arg_type,
            optional,
        });
    }

    Ok(parsed)
}

/// Builds the usage line shown on arity and parse failures, e.g.
/// `/warn <player> [reason]`. `command` arrives with its prefix applied.
pub fn usage_string(command: &str, args: &[ArgSpec]) -> String {
    iter::once(command.to_string())
        .chain(args.iter().map(|arg| {
            if arg.optional {
                format!("[{}]", arg.name)
            } else {
                format!("<{}>", arg.name)
            }
        }))
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specs(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn order_and_optional_flags_round_trip() {
        let parsed =
            parse_arg_specs(&specs(&["target:player", "duration:time", "reason:string?"])).unwrap();

        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[0].name, "target");
        assert_eq!(parsed[0].arg_type, ArgumentType::Player);
        assert!(!parsed[0].optional);
        assert_eq!(parsed[1].name, "duration");
        assert_eq!(parsed[1].arg_type, ArgumentType::Time);
        assert_eq!(parsed[2].name, "reason");
        assert!(parsed[2].optional);
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = parse_arg_specs(&specs(&["target:wizard"])).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::UnknownArgumentType { token, .. } if token == "wizard"
        ));
    }

    #[test]
    fn malformed_spec_is_rejected() {
        assert!(parse_arg_specs(&specs(&["target"])).is_err());
        assert!(parse_arg_specs(&specs(&[":player"])).is_err());
        assert!(parse_arg_specs(&specs(&["target:"])).is_err());
    }

    #[test]
    fn optional_before_required_is_rejected() {
        let err = parse_arg_specs(&specs(&["reason:string?", "target:player"])).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::OptionalBeforeRequired { optional, required }
                if optional == "reason" && required == "target"
        ));
    }

    #[test]
    fn parser_is_deterministic() {
        let raw = specs(&["a:number", "b:boolean?", "c:string?"]);
        let first = parse_arg_specs(&raw).unwrap();
        let second = parse_arg_specs(&raw).unwrap();
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.arg_type, b.arg_type);
            assert_eq!(a.optional, b.optional);
        }
    }

    #[test]
    fn usage_line_brackets_optionals() {
        let args = parse_arg_specs(&specs(&["target:player", "reason:string?"])).unwrap();
        assert_eq!(usage_string("/warn", &args), "/warn <target> [reason]");
    }
}
