//! Fixed-layout rendering of the summary image.

use chrono::{DateTime, Utc};
use image::{Rgb, RgbImage};
use terra_core::country::CountryRecord;

use crate::font::{draw_text, text_width};

const WIDTH: u32 = 640;
const HEIGHT: u32 = 400;
const MARGIN: u32 = 24;

const BACKGROUND: Rgb<u8> = Rgb([16, 24, 40]);
const ACCENT: Rgb<u8> = Rgb([96, 165, 250]);
const TEXT: Rgb<u8> = Rgb([229, 231, 235]);
const MUTED: Rgb<u8> = Rgb([148, 163, 184]);

const HEADER_SCALE: u32 = 3;
const BODY_SCALE: u32 = 2;
const FOOTER_SCALE: u32 = 1;

/// Header, total count, five ranked rows, footer timestamp. The layout is
/// fixed; rows beyond the available records render as placeholders.
pub fn render_summary(
  total: u64,
  top: &[CountryRecord],
  generated_at: DateTime<Utc>,
) -> RgbImage {
  let mut img = RgbImage::from_pixel(WIDTH, HEIGHT, BACKGROUND);

  let mut y = MARGIN;
  draw_text(&mut img, MARGIN, y, HEADER_SCALE, ACCENT, "COUNTRY SUMMARY");
  y += 7 * HEADER_SCALE + 16;

  draw_text(
    &mut img,
    MARGIN,
    y,
    BODY_SCALE,
    TEXT,
    &format!("TOTAL COUNTRIES: {total}"),
  );
  y += 7 * BODY_SCALE + 20;

  draw_text(&mut img, MARGIN, y, BODY_SCALE, MUTED, "TOP 5 BY ESTIMATED VALUE");
  y += 7 * BODY_SCALE + 12;

  for rank in 0..5usize {
    let line = match top.get(rank) {
      Some(record) => format!(
        "{}. {} - {}",
        rank + 1,
        truncate_name(&record.name, 28),
        format_currency(record.estimated_value),
      ),
      None => format!("{}. -", rank + 1),
    };
    draw_text(&mut img, MARGIN, y, BODY_SCALE, TEXT, &line);
    y += 7 * BODY_SCALE + 10;
  }

  let footer = format!(
    "GENERATED {} UTC",
    generated_at.format("%Y-%m-%d %H:%M:%S")
  );
  let footer_x = WIDTH.saturating_sub(MARGIN + text_width(&footer, FOOTER_SCALE));
  draw_text(
    &mut img,
    footer_x,
    HEIGHT - MARGIN - 7 * FOOTER_SCALE,
    FOOTER_SCALE,
    MUTED,
    &footer,
  );

  img
}

fn truncate_name(name: &str, max_chars: usize) -> String {
  if name.chars().count() <= max_chars {
    return name.to_owned();
  }
  let mut out: String = name.chars().take(max_chars.saturating_sub(1)).collect();
  out.push('.');
  out
}

/// `1234567.5` → `$1,234,567.50`.
fn format_currency(value: f64) -> String {
  let cents = (value * 100.0).round() as u64;
  let whole = cents / 100;
  let frac = cents % 100;

  let digits = whole.to_string();
  let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
  for (i, c) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      grouped.push(',');
    }
    grouped.push(c);
  }

  format!("${grouped}.{frac:02}")
}
