//! Chart request validation and path building

use std::fmt;
use std::str::FromStr;

use crate::error::{HuntedError, HuntedResult};
use crate::query::{OptionValue, Options};

/// What a chart ranks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartType {
    Artists,
    Singles,
}

impl ChartType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Artists => "artists",
            ChartType::Singles => "singles",
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartType {
    type Err = HuntedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "artists" => Ok(ChartType::Artists),
            "singles" => Ok(ChartType::Singles),
            other => Err(HuntedError::InvalidArgument(format!(
                "chart type must be one of artists, singles (got '{}')",
                other
            ))),
        }
    }
}

impl From<ChartType> for OptionValue {
    fn from(value: ChartType) -> Self {
        OptionValue::Scalar(value.as_str().to_string())
    }
}

/// Chart window in days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartPeriod {
    Day,
    Week,
    Month,
}

impl ChartPeriod {
    pub fn days(&self) -> u32 {
        match self {
            ChartPeriod::Day => 1,
            ChartPeriod::Week => 7,
            ChartPeriod::Month => 30,
        }
    }
}

impl fmt::Display for ChartPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.days())
    }
}

impl FromStr for ChartPeriod {
    type Err = HuntedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(ChartPeriod::Day),
            "7" => Ok(ChartPeriod::Week),
            "30" => Ok(ChartPeriod::Month),
            other => Err(HuntedError::InvalidArgument(format!(
                "chart period must be one of 1, 7, 30 (got '{}')",
                other
            ))),
        }
    }
}

impl From<ChartPeriod> for OptionValue {
    fn from(value: ChartPeriod) -> Self {
        OptionValue::Scalar(value.days().to_string())
    }
}

/// Read a required single-valued option
fn required_scalar<'a>(options: &'a Options, key: &str) -> HuntedResult<&'a str> {
    match options.get(key) {
        Some(OptionValue::Scalar(value)) => Ok(value.as_str()),
        Some(OptionValue::List(_)) => Err(HuntedError::InvalidArgument(format!(
            "chart option '{}' takes a single value",
            key
        ))),
        None => Err(HuntedError::InvalidArgument(format!(
            "chart option '{}' is required unless 'user' is given",
            key
        ))),
    }
}

/// Read an option that becomes a path segment; blank would leave `//`
fn path_segment<'a>(options: &'a Options, key: &str) -> HuntedResult<&'a str> {
    let value = required_scalar(options, key)?;
    if value.trim().is_empty() {
        return Err(HuntedError::InvalidArgument(format!(
            "chart option '{}' cannot be empty",
            key
        )));
    }
    Ok(value)
}

/// Split chart options into the request path and the remaining query options
///
/// `{user}` selects `/by/{user}/`. Otherwise `type` and `period` are
/// required and give `/{type}/{period}/`, prefixed by `/{name}` when a
/// genre name is present. Path keys are removed from the returned options;
/// everything else (`count`, `provider`, ...) stays in order.
pub fn build_chart_path(options: &Options) -> HuntedResult<(String, Options)> {
    let mut remaining = options.clone();

    if options.contains_key("user") {
        let user = path_segment(options, "user")?;
        let path = format!("/by/{}/", user);
        remaining.remove("user");
        return Ok((path, remaining));
    }

    let chart_type: ChartType = required_scalar(options, "type")?.parse()?;
    let period: ChartPeriod = required_scalar(options, "period")?.parse()?;

    let path = if options.contains_key("name") {
        let name = path_segment(options, "name")?;
        format!("/{}/{}/{}/", name, chart_type, period)
    } else {
        format!("/{}/{}/", chart_type, period)
    };

    for key in ["name", "type", "period", "user"] {
        remaining.remove(key);
    }

    Ok((path, remaining))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rstest::rstest;

    #[test]
    fn test_type_and_period() {
        let options = Options::new()
            .with("type", ChartType::Singles)
            .with("period", ChartPeriod::Day);
        let (path, remaining) = build_chart_path(&options).unwrap();
        assert_eq!(path, "/singles/1/");
        assert!(remaining.is_empty());
    }

    #[test]
    fn test_named_chart() {
        let options = Options::new()
            .with("name", "rock")
            .with("type", "artists")
            .with("period", 30u32);
        let (path, _) = build_chart_path(&options).unwrap();
        assert_eq!(path, "/rock/artists/30/");
    }

    #[test]
    fn test_user_chart_passes_other_keys_through() {
        let options = Options::new().with("user", "alice").with("count", 5u32);
        let (path, remaining) = build_chart_path(&options).unwrap();
        assert_eq!(path, "/by/alice/");
        assert_eq!(remaining, Options::new().with("count", 5u32));
    }

    #[test]
    fn test_user_chart_ignores_type_validation() {
        let options = Options::new().with("user", "alice").with("type", "genres");
        let (path, remaining) = build_chart_path(&options).unwrap();
        assert_eq!(path, "/by/alice/");
        assert_eq!(remaining.get("type"), Some(&OptionValue::from("genres")));
    }

    #[test]
    fn test_non_path_keys_remain_in_order() {
        let options = Options::new()
            .with("provider", vec!["itunes", "grooveshark"])
            .with("type", "singles")
            .with("count", 5u32)
            .with("period", 7u32);
        let (path, remaining) = build_chart_path(&options).unwrap();
        assert_eq!(path, "/singles/7/");
        assert_eq!(
            remaining.iter().map(|(k, _)| k).collect::<Vec<_>>(),
            ["provider", "count"]
        );
    }

    #[rstest]
    #[case::name_only(Options::new().with("name", "rock"))]
    #[case::missing_period(Options::new().with("name", "rock").with("type", "artists"))]
    #[case::bad_type(
        Options::new().with("name", "rock").with("type", "genres").with("period", 7u32)
    )]
    #[case::bad_period(
        Options::new().with("name", "rock").with("type", "artists").with("period", 14u32)
    )]
    #[case::empty(Options::new())]
    #[case::list_type(Options::new().with("type", vec!["artists"]).with("period", 1u32))]
    #[case::list_user(Options::new().with("user", vec!["alice", "bob"]))]
    #[case::empty_user(Options::new().with("user", ""))]
    #[case::blank_user(Options::new().with("user", "  ").with("count", 5u32))]
    #[case::empty_name(
        Options::new().with("name", "").with("type", "singles").with("period", 1u32)
    )]
    fn test_invalid_chart_options(#[case] options: Options) {
        assert_matches!(
            build_chart_path(&options),
            Err(HuntedError::InvalidArgument(_))
        );
    }

    #[test]
    fn test_enum_round_trip() {
        for t in [ChartType::Artists, ChartType::Singles] {
            assert_eq!(t.to_string().parse::<ChartType>().unwrap(), t);
        }
        for p in [ChartPeriod::Day, ChartPeriod::Week, ChartPeriod::Month] {
            assert_eq!(p.to_string().parse::<ChartPeriod>().unwrap(), p);
        }
    }
}
