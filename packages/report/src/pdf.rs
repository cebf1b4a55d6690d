//! Draws laid-out pages with `printpdf`.

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Polygon,
    Rgb,
};

use crate::ReportError;
use crate::layout::{Align, Element, FontStyle, PAGE_HEIGHT, PAGE_WIDTH, Page, Rgb8, text_width};

struct Fonts {
    normal: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

impl Fonts {
    const fn get(&self, style: FontStyle) -> &IndirectFontRef {
        match style {
            FontStyle::Normal => &self.normal,
            FontStyle::Bold => &self.bold,
            FontStyle::Italic => &self.italic,
        }
    }
}

fn pdf_error(e: impl std::fmt::Display) -> ReportError {
    ReportError::Pdf(e.to_string())
}

fn color(c: Rgb8) -> Color {
    Color::Rgb(Rgb::new(
        f32::from(c.0) / 255.0,
        f32::from(c.1) / 255.0,
        f32::from(c.2) / 255.0,
        None,
    ))
}

/// Converts a top-down layout coordinate to a PDF point.
fn point(x: f32, y: f32) -> Point {
    Point::new(Mm(x), Mm(PAGE_HEIGHT - y))
}

fn draw(layer: &PdfLayerReference, element: &Element, fonts: &Fonts) {
    match element {
        Element::Text {
            x,
            y,
            text,
            size,
            style,
            color: c,
            align,
        } => {
            let x = match align {
                Align::Left => *x,
                Align::Center => *x - text_width(text, *size) / 2.0,
                Align::Right => *x - text_width(text, *size),
            };
            layer.set_fill_color(color(*c));
            layer.use_text(
                text.as_str(),
                *size,
                Mm(x),
                Mm(PAGE_HEIGHT - *y),
                fonts.get(*style),
            );
        }
        Element::Line {
            x1,
            y1,
            x2,
            y2,
            width,
            color: c,
        } => {
            layer.set_outline_color(color(*c));
            layer.set_outline_thickness(width / 0.352_778);
            layer.add_line(Line {
                points: vec![(point(*x1, *y1), false), (point(*x2, *y2), false)],
                is_closed: false,
            });
        }
        Element::Rect {
            x,
            y,
            width,
            height,
            fill,
        } => {
            layer.set_fill_color(color(*fill));
            layer.add_polygon(Polygon {
                rings: vec![vec![
                    (point(*x, *y), false),
                    (point(*x + *width, *y), false),
                    (point(*x + *width, *y + *height), false),
                    (point(*x, *y + *height), false),
                ]],
                mode: PaintMode::Fill,
                winding_order: WindingOrder::NonZero,
            });
        }
    }
}

/// Renders `pages` into a PDF document titled `title`.
///
/// # Errors
///
/// Returns [`ReportError::Pdf`] if a font cannot be registered or the
/// document cannot be serialized.
pub fn render(pages: &[Page], title: &str) -> Result<Vec<u8>, ReportError> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");

    let fonts = Fonts {
        normal: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(pdf_error)?,
        italic: doc
            .add_builtin_font(BuiltinFont::HelveticaOblique)
            .map_err(pdf_error)?,
    };

    for (i, page) in pages.iter().enumerate() {
        let (page_index, layer_index) = if i == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1")
        };
        let layer = doc.get_page(page_index).get_layer(layer_index);

        for element in &page.elements {
            draw(&layer, element, &fonts);
        }
    }

    doc.save_to_bytes().map_err(pdf_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_pdf_header() {
        let pages = vec![Page {
            elements: vec![
                Element::Text {
                    x: 20.0,
                    y: 20.0,
                    text: "Hello".to_owned(),
                    size: 12.0,
                    style: FontStyle::Bold,
                    color: Rgb8::BLACK,
                    align: Align::Center,
                },
                Element::Line {
                    x1: 20.0,
                    y1: 30.0,
                    x2: 190.0,
                    y2: 30.0,
                    width: 0.5,
                    color: Rgb8::gray(100),
                },
                Element::Rect {
                    x: 20.0,
                    y: 40.0,
                    width: 170.0,
                    height: 8.0,
                    fill: Rgb8::gray(240),
                },
            ],
        }];

        let bytes = render(&pages, "Test").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn converts_colors() {
        let Color::Rgb(rgb) = color(Rgb8(255, 0, 51)) else {
            panic!("expected RGB");
        };
        assert!((rgb.r - 1.0).abs() < f32::EPSILON);
        assert!(rgb.g.abs() < f32::EPSILON);
        assert!((rgb.b - 0.2).abs() < 1e-6);
    }
}
