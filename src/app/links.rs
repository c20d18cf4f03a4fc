//! Download link construction for the GFS filter service
//!
//! Links are built deterministically from the cycle, the forecast offset and
//! the selection parameters. The `file` query parameter doubles as the local
//! filename, which makes it the dedup key for skip-if-present and
//! verification.

use std::path::{Component, Path};

use url::Url;

use crate::app::models::{Cycle, ForecastHour, SelectionParameters};
use crate::constants::gfs;
use crate::errors::{ConfigError, ConfigResult};

/// Generate forecast offsets `0, step, 2*step, ...` up to and including `max_hour`
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` if `step` is zero or negative
pub fn forecast_hours(max_hour: u32, step: i64) -> ConfigResult<Vec<ForecastHour>> {
    if step <= 0 {
        return Err(ConfigError::InvalidValue {
            field: "forecast.step".to_string(),
            value: step.to_string(),
            reason: "Step must be a positive number of hours".to_string(),
        });
    }

    let step = usize::try_from(step).unwrap_or(usize::MAX);
    Ok((0..=max_hour).step_by(step).map(ForecastHour).collect())
}

/// Published filename for a cycle and forecast offset
///
/// e.g. `gfs.t06z.pgrb2.0p25.f003`
pub fn file_name_for(model: &str, cycle: &Cycle, forecast_hour: ForecastHour) -> String {
    format!(
        "{}.t{}z.{}.f{}",
        model,
        cycle.hour.label(),
        gfs::PRODUCT,
        forecast_hour
    )
}

/// Server-side directory of a cycle, e.g. `/gfs.20240101/06/atmos`
pub fn server_dir_for(model: &str, cycle: &Cycle) -> String {
    format!(
        "/{}.{}/{}/{}",
        model,
        cycle.date_compact(),
        cycle.hour.label(),
        gfs::ATMOS_DIR
    )
}

/// Build the filter URL for one forecast file
///
/// Query parameters are appended in a fixed order: `file`, `dir`, one
/// `var_<name>=on` per variable, one `lev_<name>=on` per level, the region
/// bounds, and a trailing empty `subregion`.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` if `base_url` is not an absolute URL
pub fn build_url(
    base_url: &str,
    model: &str,
    cycle: &Cycle,
    forecast_hour: ForecastHour,
    selection: &SelectionParameters,
) -> ConfigResult<String> {
    let mut url = parse_base_url(base_url)?;

    {
        let mut query = url.query_pairs_mut();
        query.append_pair(gfs::FILE_PARAM, &file_name_for(model, cycle, forecast_hour));
        query.append_pair(gfs::DIR_PARAM, &server_dir_for(model, cycle));
        for variable in &selection.variables {
            query.append_pair(&format!("var_{}", variable), "on");
        }
        for level in &selection.levels {
            query.append_pair(&format!("lev_{}", level), "on");
        }
        for (key, bound) in &selection.region {
            query.append_pair(key, &bound.to_string());
        }
        query.append_pair(gfs::SUBREGION_PARAM, "");
    }

    Ok(url.into())
}

/// Build one link per forecast offset, in offset order
pub fn build_links(
    base_url: &str,
    model: &str,
    cycle: &Cycle,
    forecast_hours: &[ForecastHour],
    selection: &SelectionParameters,
) -> ConfigResult<Vec<String>> {
    forecast_hours
        .iter()
        .map(|hour| build_url(base_url, model, cycle, *hour, selection))
        .collect()
}

/// Extract the filename carried in the `file` query parameter
///
/// Returns `None` for unparseable URLs, a missing or empty parameter, or a
/// value that is not a single plain path component.
pub fn extract_filename(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let name = parsed
        .query_pairs()
        .find(|(key, _)| key == gfs::FILE_PARAM)
        .map(|(_, value)| value.into_owned())?;

    let mut components = Path::new(&name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Some(name),
        _ => None,
    }
}

/// Parse and sanity-check the configured endpoint root
pub fn parse_base_url(base_url: &str) -> ConfigResult<Url> {
    let invalid = |reason: String| ConfigError::InvalidValue {
        field: "gfs_api.base_url".to_string(),
        value: base_url.to_string(),
        reason,
    };

    let url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("Expected an http(s) endpoint URL".to_string()));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{CycleHour, RegionBound};
    use chrono::NaiveDate;
    use std::collections::{BTreeMap, HashSet};

    const BASE: &str = "https://nomads.ncep.noaa.gov/cgi-bin/filter_gfs_0p25.pl";

    fn cycle(hour: CycleHour) -> Cycle {
        Cycle::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), hour)
    }

    fn selection() -> SelectionParameters {
        let mut region = BTreeMap::new();
        region.insert("leftlon".to_string(), RegionBound::Integer(100));
        region.insert("rightlon".to_string(), RegionBound::Float(110.5));
        region.insert("toplat".to_string(), RegionBound::Integer(25));
        region.insert("bottomlat".to_string(), RegionBound::Integer(5));
        SelectionParameters::new(["TMP", "UGRD"], ["2_m_above_ground"], region)
    }

    #[test]
    fn test_forecast_hours_sequences() {
        let hours = forecast_hours(6, 3).unwrap();
        let labels: Vec<String> = hours.iter().map(|h| h.to_string()).collect();
        assert_eq!(labels, vec!["000", "003", "006"]);

        assert_eq!(forecast_hours(0, 1).unwrap(), vec![ForecastHour(0)]);
        assert_eq!(forecast_hours(48, 1).unwrap().len(), 49);

        // max_hour off the step grid is not included
        assert_eq!(
            forecast_hours(7, 3).unwrap(),
            vec![ForecastHour(0), ForecastHour(3), ForecastHour(6)]
        );
    }

    #[test]
    fn test_forecast_hours_rejects_non_positive_step() {
        assert!(matches!(
            forecast_hours(6, 0),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(forecast_hours(6, -3).is_err());
    }

    #[test]
    fn test_build_url_layout() {
        let url = build_url(BASE, "gfs", &cycle(CycleHour::H06), ForecastHour(3), &selection())
            .unwrap();

        assert!(url.starts_with(BASE));
        assert!(url.contains("file=gfs.t06z.pgrb2.0p25.f003"));
        assert!(url.contains("dir=%2Fgfs.20240101%2F06%2Fatmos"));
        assert!(url.contains("&var_TMP=on&var_UGRD=on"));
        assert!(url.contains("&lev_2_m_above_ground=on"));
        assert!(url.contains("bottomlat=5&leftlon=100&rightlon=110.5&toplat=25"));
        assert!(url.ends_with("&subregion="));
    }

    #[test]
    fn test_build_url_without_selection() {
        let url = build_url(
            BASE,
            "gfs",
            &cycle(CycleHour::H00),
            ForecastHour(0),
            &SelectionParameters::default(),
        )
        .unwrap();
        assert_eq!(
            url,
            format!(
                "{}?file=gfs.t00z.pgrb2.0p25.f000&dir=%2Fgfs.20240101%2F00%2Fatmos&subregion=",
                BASE
            )
        );
    }

    #[test]
    fn test_build_url_rejects_malformed_base() {
        let result = build_url(
            "not a url",
            "gfs",
            &cycle(CycleHour::H00),
            ForecastHour(0),
            &SelectionParameters::default(),
        );
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));

        assert!(parse_base_url("mailto:someone@example.com").is_err());
    }

    #[test]
    fn test_distinct_inputs_give_distinct_urls() {
        let date2 = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let mut urls = HashSet::new();
        let mut count = 0;

        let selections = vec![
            SelectionParameters::default(),
            selection(),
            SelectionParameters::new(["TMP"], Vec::<String>::new(), BTreeMap::new()),
            SelectionParameters::new(Vec::<String>::new(), ["TMP"], BTreeMap::new()),
        ];

        for date in [cycle(CycleHour::H00).date, date2] {
            for hour in CycleHour::ALL {
                for fh in forecast_hours(6, 3).unwrap() {
                    for sel in &selections {
                        let url = build_url(BASE, "gfs", &Cycle::new(date, hour), fh, sel).unwrap();
                        urls.insert(url);
                        count += 1;
                    }
                }
            }
        }

        assert_eq!(urls.len(), count);
    }

    #[test]
    fn test_extract_filename_recovers_cycle_and_offset() {
        let cycle = cycle(CycleHour::H18);
        for fh in forecast_hours(12, 6).unwrap() {
            let url = build_url(BASE, "gfs", &cycle, fh, &selection()).unwrap();
            let name = extract_filename(&url).unwrap();
            assert_eq!(name, file_name_for("gfs", &cycle, fh));
            assert!(name.contains("t18z"));
            assert!(name.ends_with(&format!("f{}", fh)));
        }
    }

    #[test]
    fn test_extract_filename_absent_cases() {
        assert_eq!(extract_filename("::not a url::"), None);
        assert_eq!(extract_filename("https://example.com/data?dir=%2Fgfs"), None);
        assert_eq!(extract_filename("https://example.com/data?file="), None);
        assert_eq!(extract_filename("https://example.com/data?file=..%2Fescape"), None);
        assert_eq!(
            extract_filename("https://example.com/data?file=gfs.t00z.pgrb2.0p25.f000"),
            Some("gfs.t00z.pgrb2.0p25.f000".to_string())
        );
    }

    #[test]
    fn test_build_links_preserves_order() {
        let hours = forecast_hours(3, 3).unwrap();
        let links = build_links(BASE, "gfs", &cycle(CycleHour::H06), &hours, &selection()).unwrap();
        let names: Vec<String> = links.iter().filter_map(|l| extract_filename(l)).collect();
        assert_eq!(
            names,
            vec!["gfs.t06z.pgrb2.0p25.f000", "gfs.t06z.pgrb2.0p25.f003"]
        );
    }
}
