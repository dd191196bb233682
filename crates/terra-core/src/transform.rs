//! The record transformer: one raw upstream country plus the rate table
//! becomes a row ready for upsert.
//!
//! Pure apart from the random multiplier draw; the RNG is a parameter so
//! tests can pass a seeded one.

use rand::Rng;

use crate::country::{NewCountry, RawCountry, RateTable};

/// Half-open range for the per-refresh estimate multiplier.
pub const MULTIPLIER_RANGE: std::ops::Range<f64> = 1000.0..2000.0;

/// Convert a raw country into upsert-ready fields.
///
/// Currency selection takes only the first entry of the upstream list; a
/// country with no currencies never consults the rate table at all. A code
/// absent from the table leaves `exchange_rate` unset without erroring.
///
/// The estimate is `population * U(1000, 2000) / rate`, rounded to two
/// decimal places, and is computed only when the population is positive and
/// a positive rate resolved. The multiplier is drawn fresh on every call, so
/// the estimate is deliberately non-reproducible across refreshes.
pub fn transform(raw: RawCountry, rates: &RateTable, rng: &mut impl Rng) -> NewCountry {
  let currency_code = raw.currencies.first().map(|c| c.code.clone());
  let exchange_rate = currency_code
    .as_deref()
    .and_then(|code| rates.get(code).copied());

  let estimated_value = match exchange_rate {
    Some(rate) if raw.population > 0 && rate > 0.0 => {
      let multiplier = rng.gen_range(MULTIPLIER_RANGE);
      round2(raw.population as f64 * multiplier / rate)
    }
    _ => 0.0,
  };

  NewCountry {
    name:            raw.name,
    capital:         raw.capital,
    region:          raw.region.unwrap_or_else(|| "Unknown".to_owned()),
    population:      raw.population,
    currency_code,
    exchange_rate,
    estimated_value,
    flag_url:        raw.flag_url,
  }
}

fn round2(v: f64) -> f64 {
  (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::country::RawCurrency;

  fn raw(name: &str, population: u64, codes: &[&str]) -> RawCountry {
    RawCountry {
      name:       name.to_owned(),
      capital:    None,
      region:     None,
      population,
      flag_url:   None,
      currencies: codes
        .iter()
        .map(|c| RawCurrency { code: (*c).to_owned(), name: None, symbol: None })
        .collect(),
    }
  }

  #[test]
  fn no_currencies_means_no_code_no_rate_no_estimate() {
    let rates = RateTable::from([("USD".to_owned(), 1.0)]);
    let out = transform(raw("Wakanda", 1_000_000, &[]), &rates, &mut rand::thread_rng());

    assert_eq!(out.currency_code, None);
    assert_eq!(out.exchange_rate, None);
    assert_eq!(out.estimated_value, 0.0);
  }

  #[test]
  fn only_first_currency_is_taken() {
    let rates = RateTable::from([("EUR".to_owned(), 0.9), ("USD".to_owned(), 1.0)]);
    let out = transform(raw("X", 10, &["EUR", "USD"]), &rates, &mut rand::thread_rng());

    assert_eq!(out.currency_code.as_deref(), Some("EUR"));
    assert_eq!(out.exchange_rate, Some(0.9));
  }

  #[test]
  fn unmapped_code_leaves_rate_and_estimate_unset() {
    let rates = RateTable::from([("USD".to_owned(), 1.0)]);
    let out = transform(raw("X", 10, &["ZZZ"]), &rates, &mut rand::thread_rng());

    assert_eq!(out.currency_code.as_deref(), Some("ZZZ"));
    assert_eq!(out.exchange_rate, None);
    assert_eq!(out.estimated_value, 0.0);
  }

  #[test]
  fn zero_population_skips_estimate() {
    let rates = RateTable::from([("USD".to_owned(), 2.0)]);
    let out = transform(raw("X", 0, &["USD"]), &rates, &mut rand::thread_rng());

    assert_eq!(out.exchange_rate, Some(2.0));
    assert_eq!(out.estimated_value, 0.0);
  }

  #[test]
  fn non_positive_rate_skips_estimate() {
    let rates = RateTable::from([("BAD".to_owned(), 0.0)]);
    let out = transform(raw("X", 100, &["BAD"]), &rates, &mut rand::thread_rng());
    assert_eq!(out.estimated_value, 0.0);
  }

  #[test]
  fn estimate_stays_within_multiplier_bounds_and_varies() {
    let rates = RateTable::from([("USD".to_owned(), 2.0)]);
    let mut rng = rand::thread_rng();
    let mut seen = std::collections::HashSet::new();

    for _ in 0..50 {
      let out = transform(raw("Testland", 100, &["USD"]), &rates, &mut rng);
      // population * 1000 / 2 ..= population * 2000 / 2
      assert!(out.estimated_value >= 50_000.0, "{}", out.estimated_value);
      assert!(out.estimated_value <= 100_000.0, "{}", out.estimated_value);
      seen.insert(out.estimated_value.to_bits());
    }
    assert!(seen.len() > 1, "multiplier should vary across draws");
  }

  #[test]
  fn estimate_is_rounded_to_two_decimals() {
    let rates = RateTable::from([("USD".to_owned(), 3.0)]);
    let out = transform(raw("X", 7, &["USD"]), &rates, &mut rand::thread_rng());
    let cents = out.estimated_value * 100.0;
    assert!((cents - cents.round()).abs() < 1e-6);
  }

  #[test]
  fn missing_region_defaults_to_unknown() {
    let out = transform(raw("X", 0, &[]), &RateTable::new(), &mut rand::thread_rng());
    assert_eq!(out.region, "Unknown");
  }
}
