use crate::commands::value::Value;
use crate::host::Lookup;
use crate::player::{PlayerId, Rank, RoleFlag, Team};
use once_cell::sync::Lazy;
use regex::Regex;

/// Account ids are 22 base64 characters plus `==` padding.
static UUID_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new("^[A-Za-z0-9+/]{22}==$").unwrap());

/// Coercion works on exactly one raw token and either produces a typed value
/// or signals a parse failure. The failure carries no message of its own; the
/// dispatcher builds the "invalid argument" message from the declared type.
pub(super) type CoerceResult = Result<Value, ()>;

pub(super) fn coerce_string(token: &str) -> CoerceResult {
    Ok(Value::String(token.to_string()))
}

pub(super) fn coerce_number(token: &str) -> CoerceResult {
    let value = token.parse::<f64>().map_err(|_| ())?;
    if !value.is_finite() {
        return Err(());
    }
    Ok(Value::Number(value))
}

pub(super) fn coerce_boolean(token: &str) -> CoerceResult {
    let value = match token.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => true,
        "false" | "no" | "0" | "off" => false,
        _ => return Err(()),
    };
    Ok(Value::Boolean(value))
}

pub(super) fn coerce_player(token: &str, lookup: &dyn Lookup) -> CoerceResult {
    let players = lookup.online_players();

    if let Some(id) = token.strip_prefix('#') {
        let id = id.parse::<u32>().map_err(|_| ())?;
        return players
            .into_iter()
            .find(|p| p.connected && p.id == PlayerId(id))
            .map(Value::Player)
            .ok_or(());
    }

    let wanted = outpost_text::strip_tags(token).to_lowercase();
    let mut containing = Vec::new();
    for player in players {
        if !player.connected {
            continue;
        }
        let name = outpost_text::strip_tags(&player.username).to_lowercase();
        if name == wanted {
            return Ok(Value::Player(player));
        }
        if name.contains(&wanted) {
            containing.push(player);
        }
    }

    // Substring matches only count when unambiguous.
    match containing.len() {
        1 => Ok(Value::Player(containing.remove(0))),
        _ => Err(()),
    }
}

pub(super) fn coerce_offline_player(token: &str, lookup: &dyn Lookup) -> CoerceResult {
    lookup
        .offline_player(token)
        .map(Value::OfflinePlayer)
        .ok_or(())
}

pub(super) fn coerce_team(token: &str, lookup: &dyn Lookup) -> CoerceResult {
    let names: Vec<String> = lookup.teams().into_iter().map(|t| t.0).collect();
    catalog_match(token, &names).map(|name| Value::Team(Team(name)))
}

pub(super) fn coerce_unit_type(token: &str, lookup: &dyn Lookup) -> CoerceResult {
    catalog_match(token, &lookup.unit_types()).map(Value::UnitType)
}

pub(super) fn coerce_block(token: &str, lookup: &dyn Lookup) -> CoerceResult {
    catalog_match(token, &lookup.block_names()).map(Value::Block)
}

pub(super) fn coerce_map(token: &str, lookup: &dyn Lookup) -> CoerceResult {
    catalog_match(token, &lookup.map_names()).map(Value::Map)
}

pub(super) fn coerce_item(token: &str, lookup: &dyn Lookup) -> CoerceResult {
    catalog_match(token, &lookup.item_names()).map(Value::Item)
}

pub(super) fn coerce_time(token: &str) -> CoerceResult {
    parse_duration_millis(token).map(Value::Time).ok_or(())
}

pub(super) fn coerce_uuid(token: &str) -> CoerceResult {
    if UUID_REGEX.is_match(token) {
        Ok(Value::Uuid(token.to_string()))
    } else {
        Err(())
    }
}

pub(super) fn coerce_rank(token: &str) -> CoerceResult {
    Rank::parse(token).map(Value::Rank).ok_or(())
}

pub(super) fn coerce_role_flag(token: &str) -> CoerceResult {
    RoleFlag::parse(token).map(Value::RoleFlag).ok_or(())
}

/// Case-insensitive exact match against a catalog of names, falling back to a
/// unique prefix match.
fn catalog_match(token: &str, names: &[String]) -> Result<String, ()> {
    let wanted = token.to_lowercase();

    if let Some(name) = names.iter().find(|name| name.to_lowercase() == wanted) {
        return Ok(name.clone());
    }

    let mut prefixed = names
        .iter()
        .filter(|name| name.to_lowercase().starts_with(&wanted));
    match (prefixed.next(), prefixed.next()) {
        (Some(name), None) => Ok(name.clone()),
        _ => Err(()),
    }
}

/// Parses a duration string into milliseconds. Groups of `<n><unit>` with
/// units `s m h d w`; a bare trailing number counts as seconds.
pub fn parse_duration_millis(input: &str) -> Option<u64> {
    if input.is_empty() {
        return None;
    }

    let mut total: u64 = 0;
    let mut digits = String::new();

    for ch in input.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            continue;
        }

        let unit_millis: u64 = match ch.to_ascii_lowercase() {
            's' => 1_000,
            'm' => 60_000,
            'h' => 3_600_000,
            'd' => 86_400_000,
            'w' => 604_800_000,
            _ => return None,
        };

        if digits.is_empty() {
            return None;
        }
        let count = digits.parse::<u64>().ok()?;
        total = total.checked_add(count.checked_mul(unit_millis)?)?;
        digits.clear();
    }

    if !digits.is_empty() {
        let count = digits.parse::<u64>().ok()?;
        total = total.checked_add(count.checked_mul(1_000)?)?;
    }

    Some(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Player;

    fn player(id: u32, username: &str) -> Player {
        Player {
            id: PlayerId(id),
            uuid: format!("uuid-{id}"),
            username: username.to_string(),
            rank: Rank::Player,
            team: Team::new("sharded"),
            flags: Vec::new(),
            connected: true,
            unit_alive: true,
            lang: "en".to_string(),
        }
    }

    struct Players(Vec<Player>);

    impl Lookup for Players {
        fn online_players(&self) -> Vec<Player> {
            self.0.clone()
        }
        fn offline_player(&self, _token: &str) -> Option<crate::player::OfflinePlayer> {
            None
        }
        fn teams(&self) -> Vec<Team> {
            vec![Team::new("sharded"), Team::new("crux")]
        }
        fn unit_types(&self) -> Vec<String> {
            vec!["dagger".to_string(), "mace".to_string()]
        }
        fn block_names(&self) -> Vec<String> {
            Vec::new()
        }
        fn map_names(&self) -> Vec<String> {
            Vec::new()
        }
        fn item_names(&self) -> Vec<String> {
            Vec::new()
        }
    }

    #[test]
    fn duration_parsing() {
        assert_eq!(parse_duration_millis("45s"), Some(45_000));
        assert_eq!(parse_duration_millis("1h30m"), Some(5_400_000));
        assert_eq!(parse_duration_millis("90"), Some(90_000));
        assert_eq!(parse_duration_millis("2d12h"), Some(216_000_000));
        assert_eq!(parse_duration_millis(""), None);
        assert_eq!(parse_duration_millis("h"), None);
        assert_eq!(parse_duration_millis("5x"), None);
    }

    #[test]
    fn uuid_pattern() {
        assert!(coerce_uuid("AAAAAAAAAAAAAAAAAAAAAA==").is_ok());
        assert!(coerce_uuid("AAAAAAAAAAAAAAAAAAAAAA").is_err());
        assert!(coerce_uuid("AAAA!AAAAAAAAAAAAAAAAA==").is_err());
    }

    #[test]
    fn boolean_spellings() {
        assert!(matches!(coerce_boolean("YES"), Ok(Value::Boolean(true))));
        assert!(matches!(coerce_boolean("off"), Ok(Value::Boolean(false))));
        assert!(coerce_boolean("maybe").is_err());
    }

    #[test]
    fn number_rejects_non_finite() {
        assert!(coerce_number("3.5").is_ok());
        assert!(coerce_number("inf").is_err());
        assert!(coerce_number("NaN").is_err());
    }

    #[test]
    fn player_fuzzy_match() {
        let lookup = Players(vec![player(1, "[red]Nova"), player(2, "novice"), player(3, "Zed")]);

        // Exact name wins even when another name contains it.
        let Ok(Value::Player(p)) = coerce_player("nova", &lookup) else {
            panic!("expected exact match");
        };
        assert_eq!(p.id, PlayerId(1));

        // Unique substring match.
        let Ok(Value::Player(p)) = coerce_player("zed", &lookup) else {
            panic!("expected substring match");
        };
        assert_eq!(p.id, PlayerId(3));

        // Ambiguous substring is a failure.
        assert!(coerce_player("nov", &lookup).is_err());

        // Id match.
        let Ok(Value::Player(p)) = coerce_player("#2", &lookup) else {
            panic!("expected id match");
        };
        assert_eq!(p.id, PlayerId(2));
    }

    #[test]
    fn catalog_prefix_match() {
        let lookup = Players(Vec::new());
        assert!(matches!(coerce_team("cr", &lookup), Ok(Value::Team(t)) if t.name() == "crux"));
        assert!(
            matches!(coerce_unit_type("dag", &lookup), Ok(Value::UnitType(u)) if u == "dagger")
        );
        assert!(coerce_unit_type("zzz", &lookup).is_err());
    }
}
