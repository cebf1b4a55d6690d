//! Report pagination.
//!
//! Positions are in millimetres on an A4 page, measured from the top-left
//! corner with `y` at the text baseline. The builder keeps a cursor and
//! breaks to a new page whenever the next block would run into the footer
//! band (`PAGE_HEIGHT - MARGIN - FOOTER_RESERVE`).

use zone_map_analysis_models::AnalysisResult;
use zone_map_geometry::{approximate_area_sq_km, format_coordinate, sq_km_to_sq_mi};
use zone_map_zone_models::{Units, Zone};

use crate::ReportSnapshot;

pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;
pub const MARGIN: f32 = 20.0;
pub const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
/// Space kept free above the bottom margin for the page footer.
pub const FOOTER_RESERVE: f32 = 15.0;
/// Coordinate rows printed per zone before the table is truncated.
pub const MAX_COORDINATE_ROWS: usize = 15;

const PT_TO_MM: f32 = 0.352_778;

/// Average Helvetica glyph advance as a fraction of the font size.
const AVG_GLYPH_WIDTH: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Normal,
    Bold,
    Italic,
}

/// Horizontal anchor of a text element relative to its `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb8(pub u8, pub u8, pub u8);

impl Rgb8 {
    pub const BLACK: Self = Self(0, 0, 0);

    #[must_use]
    pub const fn gray(level: u8) -> Self {
        Self(level, level, level)
    }
}

/// One positioned drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text {
        x: f32,
        y: f32,
        text: String,
        /// Font size in points.
        size: f32,
        style: FontStyle,
        color: Rgb8,
        align: Align,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        /// Stroke width in millimetres.
        width: f32,
        color: Rgb8,
    },
    /// A filled rectangle with its top-left corner at `(x, y)`.
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Rgb8,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub elements: Vec<Element>,
}

impl Page {
    /// Text of every text element on the page, in drawing order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.elements
            .iter()
            .filter_map(|e| match e {
                Element::Text { text, .. } => Some(text.as_str()),
                Element::Line { .. } | Element::Rect { .. } => None,
            })
            .collect()
    }
}

/// Estimated width of `text` in millimetres at `size` points.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * AVG_GLYPH_WIDTH * PT_TO_MM
}

/// Greedy word wrap to `max_width` millimetres.
#[must_use]
pub fn wrap_text(text: &str, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_owned()
        } else {
            format!("{current} {word}")
        };

        if !current.is_empty() && text_width(&candidate, size) > max_width {
            lines.push(std::mem::replace(&mut current, word.to_owned()));
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    lines
}

/// Text state and cursor, mirroring how a PDF drawing context is driven.
struct Builder {
    pages: Vec<Page>,
    y: f32,
    size: f32,
    style: FontStyle,
    color: Rgb8,
}

impl Builder {
    fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            y: MARGIN,
            size: 10.0,
            style: FontStyle::Normal,
            color: Rgb8::BLACK,
        }
    }

    fn page_index(&self) -> usize {
        self.pages.len() - 1
    }

    fn push(&mut self, element: Element) {
        if let Some(page) = self.pages.last_mut() {
            page.elements.push(element);
        }
    }

    fn add_page(&mut self) {
        self.pages.push(Page::default());
        self.y = MARGIN;
    }

    fn font(&mut self, size: f32, style: FontStyle, color: Rgb8) {
        self.size = size;
        self.style = style;
        self.color = color;
    }

    fn text_at(&mut self, text: impl Into<String>, x: f32, y: f32, align: Align) {
        self.push(Element::Text {
            x,
            y,
            text: text.into(),
            size: self.size,
            style: self.style,
            color: self.color,
            align,
        });
    }

    fn text(&mut self, text: impl Into<String>, x: f32) {
        let y = self.y;
        self.text_at(text, x, y, Align::Left);
    }

    fn line(&mut self, y: f32, width: f32, color: Rgb8) {
        self.push(Element::Line {
            x1: MARGIN,
            y1: y,
            x2: PAGE_WIDTH - MARGIN,
            y2: y,
            width,
            color,
        });
    }

    fn rect(&mut self, y: f32, height: f32, fill: Rgb8) {
        self.push(Element::Rect {
            x: MARGIN,
            y,
            width: CONTENT_WIDTH,
            height,
            fill,
        });
    }

    /// Starts a new page if `required` more millimetres would not fit.
    fn check_page_break(&mut self, required: f32) -> bool {
        if self.y + required > PAGE_HEIGHT - MARGIN - FOOTER_RESERVE {
            self.add_page();
            return true;
        }
        false
    }

    fn section_header(&mut self, title: &str, size: f32) {
        self.check_page_break(25.0);
        self.font(size, FontStyle::Bold, Rgb8::BLACK);
        self.text(title, MARGIN);
        self.y += 10.0;
        self.line(self.y - 2.0, 0.5, Rgb8::gray(100));
        self.y += 8.0;
    }

    fn label_value(&mut self, label: &str, value: &str, indent: f32) {
        self.check_page_break(8.0);
        let x = MARGIN + indent;
        self.font(10.0, FontStyle::Bold, Rgb8::BLACK);
        let label = format!("{label}:");
        let offset = text_width(&format!("{label} "), self.size);
        self.text(label, x);
        self.style = FontStyle::Normal;
        self.text(value, x + offset);
        self.y += 7.0;
    }

    fn subheading(&mut self, title: &str, required: f32, size: f32) {
        self.check_page_break(required);
        self.font(size, FontStyle::Bold, Rgb8::BLACK);
        self.text(title, MARGIN);
        self.y += 8.0;
    }

    fn coordinate_table(&mut self, zone: &Zone) {
        if zone.ring.is_empty() {
            return;
        }

        self.check_page_break(30.0);
        self.rect(self.y, 8.0, Rgb8::gray(240));
        self.font(9.0, FontStyle::Bold, Rgb8::BLACK);
        let baseline = self.y + 6.0;
        self.text_at("#", MARGIN + 2.0, baseline, Align::Left);
        self.text_at("Latitude", MARGIN + 15.0, baseline, Align::Left);
        self.text_at("Longitude", MARGIN + 80.0, baseline, Align::Left);
        self.y += 8.0;

        self.style = FontStyle::Normal;
        for (i, point) in zone.ring.iter().take(MAX_COORDINATE_ROWS).enumerate() {
            if self.check_page_break(8.0) {
                self.font(9.0, FontStyle::Normal, Rgb8::BLACK);
            }
            if i % 2 == 0 {
                self.rect(self.y, 8.0, Rgb8::gray(250));
            }
            let baseline = self.y + 6.0;
            self.text_at((i + 1).to_string(), MARGIN + 2.0, baseline, Align::Left);
            self.text_at(format_coordinate(point.lat), MARGIN + 15.0, baseline, Align::Left);
            self.text_at(format_coordinate(point.lng), MARGIN + 80.0, baseline, Align::Left);
            self.y += 8.0;
        }

        if zone.ring.len() > MAX_COORDINATE_ROWS {
            self.check_page_break(8.0);
            self.y += 6.0;
            self.font(9.0, FontStyle::Italic, Rgb8::gray(100));
            self.text(
                format!(
                    "... and {} more coordinates",
                    zone.ring.len() - MAX_COORDINATE_ROWS
                ),
                MARGIN + 5.0,
            );
            self.y += 1.0;
        }

        self.y += 5.0;
    }

    fn analysis(&mut self, analysis: &AnalysisResult) {
        self.y += 5.0;
        self.section_header("Analysis Results", 14.0);

        self.check_page_break(30.0);
        self.font(12.0, FontStyle::Bold, Rgb8::BLACK);
        self.text("Suitability Assessment", MARGIN);
        self.y += 10.0;
        self.font(16.0, FontStyle::Bold, Rgb8(0, 100, 0));
        self.text(format!("{}/100", analysis.suitability.score), MARGIN);
        self.y += 10.0;
        self.label_value("FAO Classification", &analysis.suitability.fao_class, 0.0);
        self.y += 5.0;

        self.subheading("Suitability Components", 50.0, 11.0);
        for (label, value) in analysis.suitability.components.entries() {
            self.label_value(label, &value.to_string(), 5.0);
        }
        self.y += 5.0;

        self.subheading("Risk Assessment", 50.0, 11.0);
        for (label, risk) in analysis.risks.entries() {
            self.label_value(label, &risk.to_string(), 5.0);
        }
        self.y += 5.0;

        self.subheading("Summary", 40.0, 11.0);
        for panel in &analysis.summary_panels {
            self.check_page_break(25.0);
            self.font(10.0, FontStyle::Bold, Rgb8::BLACK);
            self.text(panel.title.as_str(), MARGIN + 5.0);
            self.y += 7.0;

            for bullet in &panel.bullets {
                self.check_page_break(7.0);
                self.font(10.0, FontStyle::Normal, Rgb8::BLACK);
                self.text(format!("\u{2022} {bullet}"), MARGIN + 10.0);
                self.y += 6.0;
            }
            self.y += 3.0;
        }
    }
}

fn area_text(zone: &Zone, units: Units) -> Option<String> {
    let sq_km = approximate_area_sq_km(&zone.ring);
    if sq_km <= 0.0 {
        return None;
    }

    Some(match units {
        Units::Metric => format!("{sq_km:.2} km\u{b2}"),
        Units::Imperial => format!("{:.2} mi\u{b2}", sq_km_to_sq_mi(sq_km)),
    })
}

fn cover_page(b: &mut Builder, snapshot: &ReportSnapshot, generated: &str) {
    b.font(28.0, FontStyle::Bold, Rgb8::BLACK);
    let line_height = 28.0 * PT_TO_MM * 1.15;
    let mut y = 60.0;
    for line in wrap_text(snapshot.display_title(), 28.0, CONTENT_WIDTH) {
        b.text_at(line, MARGIN, y, Align::Left);
        y += line_height;
    }

    b.font(12.0, FontStyle::Normal, Rgb8::gray(100));
    b.text_at(format!("Generated: {generated}"), MARGIN, 80.0, Align::Left);

    b.size = 10.0;
    b.text_at(
        format!("Total Zones: {}", snapshot.zones.len()),
        MARGIN,
        95.0,
        Align::Left,
    );
    if !snapshot.search_context.is_empty() {
        b.text_at(
            format!("Location: {}", snapshot.search_context),
            MARGIN,
            105.0,
            Align::Left,
        );
    }

    b.line(PAGE_HEIGHT - 40.0, 1.0, Rgb8::gray(200));

    b.font(8.0, FontStyle::Normal, Rgb8::gray(150));
    b.text_at(
        "Project Analysis Report",
        PAGE_WIDTH / 2.0,
        PAGE_HEIGHT - 25.0,
        Align::Center,
    );
}

/// Writes the table of contents and returns, per zone, the page and
/// element index of its page-number text so it can be filled in later.
fn table_of_contents(b: &mut Builder, zones: &[Zone]) -> Vec<(usize, usize)> {
    b.add_page();
    b.section_header("Table of Contents", 18.0);

    let mut slots = Vec::with_capacity(zones.len());
    for (index, zone) in zones.iter().enumerate() {
        b.check_page_break(8.0);
        b.font(11.0, FontStyle::Normal, Rgb8::BLACK);
        b.text(format!("{}. {}", index + 1, zone.name), MARGIN + 5.0);
        let y = b.y;
        b.text_at("...", PAGE_WIDTH - MARGIN, y, Align::Right);
        let page = b.page_index();
        slots.push((page, b.pages[page].elements.len() - 1));
        b.y += 8.0;
    }
    b.y += 10.0;

    slots
}

fn project_overview(b: &mut Builder, snapshot: &ReportSnapshot) {
    b.add_page();
    b.section_header("Project Overview", 18.0);

    b.label_value("Project Name", snapshot.display_title(), 0.0);
    let location = if snapshot.search_context.is_empty() {
        "Not specified"
    } else {
        &snapshot.search_context
    };
    b.label_value("Location", location, 0.0);

    if !snapshot.center_lat.is_empty() && !snapshot.center_lng.is_empty() {
        b.label_value(
            "Center Coordinates",
            &format!("{}, {}", snapshot.center_lat, snapshot.center_lng),
            0.0,
        );
    }

    b.label_value(
        "Analysis Period",
        &format!(
            "{} - {}",
            snapshot.date_range.format_from(),
            snapshot.date_range.format_to()
        ),
        0.0,
    );
    b.label_value("Map Type", snapshot.map_type.label(), 0.0);
    b.label_value("Units", snapshot.units.label(), 0.0);
    b.label_value("Total Zones", &snapshot.zones.len().to_string(), 0.0);
    b.y += 5.0;
}

fn zone_section(b: &mut Builder, snapshot: &ReportSnapshot, index: usize) {
    let zone = &snapshot.zones[index];

    b.font(20.0, FontStyle::Bold, Rgb8::BLACK);
    b.text(format!("Zone {}: {}", index + 1, zone.name), MARGIN);
    b.y += 12.0;
    b.line(b.y - 2.0, 1.0, Rgb8::gray(50));
    b.y += 10.0;

    b.section_header("Zone Information", 14.0);
    b.label_value("Zone Name", &zone.name, 0.0);
    b.label_value("Zone Type", zone.kind.as_ref(), 0.0);
    b.label_value("Zone ID", zone.id.as_str(), 0.0);
    if !zone.ring.is_empty() {
        b.label_value("Number of Vertices", &zone.ring.len().to_string(), 0.0);
        if let Some(area) = area_text(zone, snapshot.units) {
            b.label_value("Approximate Area", &area, 0.0);
        }
    }
    b.label_value(
        "Center Point",
        &format!(
            "Lat: {}, Lng: {}",
            format_coordinate(zone.centroid.lat),
            format_coordinate(zone.centroid.lng)
        ),
        0.0,
    );
    b.y += 5.0;

    if !zone.ring.is_empty() {
        b.section_header("Coordinates", 14.0);
        b.coordinate_table(zone);
    }

    if let Some(analysis) = snapshot.analysis_by_zone_id.get(&zone.id) {
        b.analysis(analysis);
    } else if snapshot.analysis_by_zone_id.is_empty() && index == 0 {
        b.check_page_break(10.0);
        b.font(10.0, FontStyle::Italic, Rgb8::gray(150));
        b.text("No analysis results available for this zone.", MARGIN);
        b.y += 10.0;
    }

    if let Some(next) = snapshot.zones.get(index + 1) {
        b.check_page_break(15.0);
        b.y += 5.0;
        b.line(b.y, 0.2, Rgb8::gray(220));
        b.y += 10.0;
        b.font(8.0, FontStyle::Italic, Rgb8::gray(150));
        b.text(
            format!("Continue to Zone {}: {}", index + 2, next.name),
            MARGIN,
        );
    }
}

fn footers(pages: &mut [Page], title: &str) {
    let total = pages.len();
    for (i, page) in pages.iter_mut().enumerate() {
        let y = PAGE_HEIGHT - 10.0;
        let color = Rgb8::gray(128);
        page.elements.push(Element::Text {
            x: PAGE_WIDTH / 2.0,
            y,
            text: format!("Page {} of {total}", i + 1),
            size: 8.0,
            style: FontStyle::Normal,
            color,
            align: Align::Center,
        });
        page.elements.push(Element::Text {
            x: MARGIN,
            y,
            text: title.to_owned(),
            size: 8.0,
            style: FontStyle::Normal,
            color,
            align: Align::Left,
        });
    }
}

/// Paginates `snapshot`. `generated` is printed on the cover as-is.
#[must_use]
pub fn layout(snapshot: &ReportSnapshot, generated: &str) -> Vec<Page> {
    let mut b = Builder::new();

    cover_page(&mut b, snapshot, generated);

    let toc = if snapshot.zones.len() > 1 {
        table_of_contents(&mut b, &snapshot.zones)
    } else {
        Vec::new()
    };

    project_overview(&mut b, snapshot);

    let mut zone_pages = Vec::with_capacity(snapshot.zones.len());
    for index in 0..snapshot.zones.len() {
        b.add_page();
        zone_pages.push(b.page_index() + 1);
        zone_section(&mut b, snapshot, index);
    }

    for ((page, element), number) in toc.into_iter().zip(zone_pages) {
        if let Some(Element::Text { text, .. }) = b.pages[page].elements.get_mut(element) {
            *text = format!("... {number}");
        }
    }

    log::debug!(
        "Laid out {} zones over {} pages",
        snapshot.zones.len(),
        b.pages.len()
    );

    let mut pages = b.pages;
    footers(&mut pages, snapshot.display_title());
    pages
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use zone_map_zone_models::{DateRange, LatLng, MapType, ZoneId, ZoneKind};

    use super::*;

    fn zone(n: u64, points: usize) -> Zone {
        #[allow(clippy::cast_precision_loss)]
        let ring: Vec<LatLng> = (0..points)
            .map(|i| {
                let angle = i as f64 / points as f64 * std::f64::consts::TAU;
                LatLng::new(angle.sin(), angle.cos())
            })
            .collect();
        Zone {
            id: ZoneId::from_sequence(n),
            name: format!("Zone {n}"),
            kind: ZoneKind::Polygon,
            centroid: zone_map_geometry::centroid(&ring).unwrap(),
            ring,
        }
    }

    fn snapshot(zones: Vec<Zone>) -> ReportSnapshot {
        ReportSnapshot {
            title: "Basin Survey".to_owned(),
            zones,
            search_context: "Lake Victoria".to_owned(),
            center_lat: "-1.000000".to_owned(),
            center_lng: "33.000000".to_owned(),
            date_range: DateRange {
                from_year: "2024".to_owned(),
                from_month: "1".to_owned(),
                from_day: "5".to_owned(),
                ..DateRange::default()
            },
            map_type: MapType::Satellite,
            analysis_by_zone_id: BTreeMap::new(),
            units: Units::Metric,
        }
    }

    fn all_texts(pages: &[Page]) -> Vec<String> {
        pages
            .iter()
            .flat_map(|p| p.texts().into_iter().map(str::to_owned))
            .collect()
    }

    fn assert_within_content_area(pages: &[Page]) {
        for page in pages {
            for element in &page.elements {
                if let Element::Text { y, text, .. } = element {
                    let is_footer = (*y - (PAGE_HEIGHT - 10.0)).abs() < f32::EPSILON;
                    let is_cover_tagline = text == "Project Analysis Report";
                    if !is_footer && !is_cover_tagline {
                        assert!(
                            *y <= PAGE_HEIGHT - MARGIN,
                            "'{text}' at y={y} runs into the footer"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn single_zone_has_no_table_of_contents() {
        let pages = layout(&snapshot(vec![zone(1, 4)]), "2024-01-01 00:00:00");
        // cover, overview, zone
        assert_eq!(pages.len(), 3);
        assert!(!all_texts(&pages).iter().any(|t| t == "Table of Contents"));
    }

    #[test]
    fn cover_page_contents() {
        let pages = layout(&snapshot(vec![zone(1, 4)]), "2024-01-01 09:30:00");
        let cover = pages[0].texts();
        assert_eq!(cover[0], "Basin Survey");
        assert!(cover.contains(&"Generated: 2024-01-01 09:30:00"));
        assert!(cover.contains(&"Total Zones: 1"));
        assert!(cover.contains(&"Location: Lake Victoria"));
        assert!(cover.contains(&"Project Analysis Report"));
    }

    #[test]
    fn overview_labels_and_values() {
        let pages = layout(&snapshot(vec![zone(1, 4)]), "now");
        let overview = pages[1].texts();
        assert!(overview.contains(&"Project Overview"));
        assert!(overview.contains(&"Center Coordinates:"));
        assert!(overview.contains(&"-1.000000, 33.000000"));
        assert!(overview.contains(&"January 5, 2024 - Not set"));
        assert!(overview.contains(&"Satellite"));
        assert!(overview.contains(&"Metric"));
    }

    #[test]
    fn toc_points_at_zone_pages() {
        let pages = layout(&snapshot(vec![zone(1, 3), zone(2, 3), zone(3, 3)]), "now");
        let toc = pages[1].texts();
        assert!(toc.contains(&"Table of Contents"));
        assert!(toc.contains(&"1. Zone 1"));
        // cover, toc, overview, then one page per short zone
        assert!(toc.contains(&"... 4"));
        assert!(toc.contains(&"... 5"));
        assert!(toc.contains(&"... 6"));
        assert!(pages[3].texts().contains(&"Zone 1: Zone 1"));
        assert!(pages[5].texts().contains(&"Zone 3: Zone 3"));
    }

    #[test]
    fn coordinate_table_is_capped() {
        let pages = layout(&snapshot(vec![zone(1, 20)]), "now");
        let texts = all_texts(&pages);
        assert!(texts.iter().any(|t| t == "15"));
        assert!(!texts.iter().any(|t| t == "16"));
        assert!(texts.iter().any(|t| t == "... and 5 more coordinates"));
    }

    #[test]
    fn no_analysis_note_only_on_first_zone() {
        let pages = layout(&snapshot(vec![zone(1, 3), zone(2, 3)]), "now");
        let notes = all_texts(&pages)
            .into_iter()
            .filter(|t| t == "No analysis results available for this zone.")
            .count();
        assert_eq!(notes, 1);
    }

    #[test]
    fn analysis_sections_render() {
        let z = zone(1, 3);
        let mut snap = snapshot(vec![z.clone(), zone(2, 3)]);
        snap.analysis_by_zone_id
            .insert(z.id, AnalysisResult::placeholder());

        let pages = layout(&snap, "now");
        let texts = all_texts(&pages);
        for heading in [
            "Analysis Results",
            "Suitability Assessment",
            "72/100",
            "Suitability Components",
            "Risk Assessment",
            "55 - Medium",
            "Summary",
            "\u{2022} High Water Levels",
        ] {
            assert!(texts.iter().any(|t| t == heading), "missing {heading}");
        }
        assert!(
            !texts
                .iter()
                .any(|t| t == "No analysis results available for this zone.")
        );
        assert_within_content_area(&pages);
    }

    #[test]
    fn continuation_note_between_zones() {
        let pages = layout(&snapshot(vec![zone(1, 3), zone(2, 3)]), "now");
        let texts = all_texts(&pages);
        assert!(texts.iter().any(|t| t == "Continue to Zone 2: Zone 2"));
        assert!(!texts.iter().any(|t| t.starts_with("Continue to Zone 3")));
    }

    #[test]
    fn every_page_has_footer() {
        let pages = layout(&snapshot(vec![zone(1, 3), zone(2, 3)]), "now");
        let total = pages.len();
        for (i, page) in pages.iter().enumerate() {
            let texts = page.texts();
            assert!(texts.contains(&format!("Page {} of {total}", i + 1).as_str()));
            assert!(texts.contains(&"Basin Survey"));
        }
    }

    #[test]
    fn imperial_area_is_converted() {
        let z = zone(1, 4);
        let sq_km = approximate_area_sq_km(&z.ring);
        let mut snap = snapshot(vec![z]);
        snap.units = Units::Imperial;

        let texts = all_texts(&layout(&snap, "now"));
        let expected = format!("{:.2} mi\u{b2}", sq_km * 0.386_102);
        assert!(texts.contains(&expected));
    }

    #[test]
    fn long_analysis_breaks_pages() {
        let z = zone(1, 15);
        let mut analysis = AnalysisResult::placeholder();
        analysis.summary_panels.extend(analysis.summary_panels.clone());
        let mut snap = snapshot(vec![z.clone()]);
        snap.analysis_by_zone_id.insert(z.id, analysis);

        let pages = layout(&snap, "now");
        // cover, overview, and a zone section spilling over several pages
        assert!(pages.len() > 3);
        assert_within_content_area(&pages);
    }

    #[test]
    fn wraps_long_titles() {
        let lines = wrap_text(&"word ".repeat(40), 28.0, CONTENT_WIDTH);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| text_width(l, 28.0) <= CONTENT_WIDTH));
    }
}
