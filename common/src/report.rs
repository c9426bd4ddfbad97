//! Downloadable PDF report for a prediction.
//!
//! Layout is computed first as positioned lines (top-left origin, mm) and
//! then drawn with `printpdf`, which measures from the bottom of the page.

use chrono::NaiveDate;
use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::error::ReportError;
use crate::model::Prediction;

pub const REPORT_TITLE: &str = "AgriVision - Disease Detection Report";
pub const REPORT_FILE_NAME: &str = "agrivision-report.pdf";

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_X_MM: f32 = 20.0;
const TEXT_WIDTH_MM: f32 = 170.0;
const PT_TO_MM: f32 = 0.3528;
/// Average Helvetica glyph advance as a fraction of the font size.
const AVG_GLYPH_EM: f32 = 0.5;
const LINE_HEIGHT_FACTOR: f32 = 1.15;

/// One positioned line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLine {
    pub text: String,
    pub font_size: f32,
    pub x_mm: f32,
    /// Baseline, measured from the top edge.
    pub y_mm: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub prediction: Prediction,
    pub date: NaiveDate,
}

impl Report {
    pub fn new(prediction: Prediction, date: NaiveDate) -> Self {
        Report { prediction, date }
    }

    /// Fixed layout; the remedy is wrapped to the text width.
    pub fn layout(&self) -> Vec<ReportLine> {
        let line = |text: String, font_size: f32, y_mm: f32| ReportLine {
            text,
            font_size,
            x_mm: MARGIN_X_MM,
            y_mm,
        };

        let mut lines = vec![
            line(REPORT_TITLE.into(), 20.0, 20.0),
            line(format!("Date: {}", self.date.format("%Y-%m-%d")), 12.0, 35.0),
            line("Detected Disease:".into(), 16.0, 50.0),
            line(self.prediction.label.clone(), 14.0, 60.0),
            line("Confidence:".into(), 16.0, 75.0),
            line(self.prediction.confidence_label(), 14.0, 85.0),
            line("Recommended Treatment:".into(), 16.0, 100.0),
        ];

        let body_size = 12.0;
        let step = body_size * LINE_HEIGHT_FACTOR * PT_TO_MM;
        let wrapped = wrap_text(&self.prediction.remedy, chars_per_line(body_size, TEXT_WIDTH_MM));
        for (i, text) in wrapped.into_iter().enumerate() {
            lines.push(line(text, body_size, 110.0 + i as f32 * step));
        }
        lines
    }

    /// All text of the report, one line per layout line.
    pub fn plain_text(&self) -> String {
        self.layout()
            .into_iter()
            .map(|l| l.text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render the layout as a single A4 page.
    pub fn to_pdf(&self) -> Result<Vec<u8>, ReportError> {
        let (doc, page, layer) =
            PdfDocument::new(REPORT_TITLE, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Report");
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ReportError::Pdf(e.to_string()))?;
        let canvas = doc.get_page(page).get_layer(layer);

        for l in self.layout() {
            canvas.use_text(
                l.text,
                l.font_size,
                Mm(l.x_mm),
                Mm(PAGE_HEIGHT_MM - l.y_mm),
                &font,
            );
        }

        doc.save_to_bytes().map_err(|e| ReportError::Pdf(e.to_string()))
    }
}

fn chars_per_line(font_size_pt: f32, width_mm: f32) -> usize {
    let glyph_mm = font_size_pt * AVG_GLYPH_EM * PT_TO_MM;
    ((width_mm / glyph_mm).floor() as usize).max(1)
}

/// Greedy word wrap to at most `max_chars` per line. Words longer than a
/// line are split. Existing newlines are kept.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut out = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > max_chars {
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
                let rest = word.split_off(max_chars);
                out.push(word.into_iter().collect());
                word = rest;
            }
            let word: String = word.into_iter().collect();
            let needed = if current.is_empty() {
                word.chars().count()
            } else {
                current.chars().count() + 1 + word.chars().count()
            };
            if needed > max_chars && !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
        }
        out.push(current);
    }
    if out.is_empty() {
        out.push(String::new());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(remedy: &str) -> Report {
        Report::new(
            Prediction {
                label: "Late Blight".into(),
                confidence: 87.0,
                remedy: remedy.into(),
            },
            NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        )
    }

    #[test]
    fn test_layout_contains_values() {
        let text = report("Apply fungicide.").plain_text();
        assert!(text.starts_with(REPORT_TITLE));
        assert!(text.contains("Date: 2024-06-15"));
        assert!(text.contains("Late Blight"));
        assert!(text.contains("87%"));
        assert!(text.contains("Apply fungicide."));
    }

    #[test]
    fn test_long_remedy_wraps_within_width() {
        let remedy = "Remove and destroy infected plants. ".repeat(12);
        let lines = report(&remedy).layout();
        let body: Vec<_> = lines.iter().filter(|l| l.y_mm >= 110.0).collect();
        let limit = chars_per_line(12.0, TEXT_WIDTH_MM);

        assert!(body.len() > 1);
        assert!(body.iter().all(|l| l.text.chars().count() <= limit));
        assert!(body.windows(2).all(|w| w[1].y_mm > w[0].y_mm));
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_text("a\nb", 10), vec!["a", "b"]);
        assert_eq!(wrap_text("", 10), vec![""]);
    }

    #[test]
    fn test_pdf_bytes() {
        let bytes = report("Apply fungicide.").to_pdf().unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
