//! lopdf access layer for the PDF converter.
//!
//! Keeps lopdf types out of the converter: page enumeration, per-page text,
//! page dimensions and text-object bounding boxes.

use std::collections::BTreeMap;

use lopdf::content::Content;
use lopdf::{Document as LopdfDocument, Object};
use serde_json::{json, Value};

use crate::error::{Error, Result};

/// Page identifier: (object number, generation number).
pub type PageId = (u32, u16);

/// US Letter, used when a page carries no usable MediaBox.
const LETTER: (f32, f32) = (612.0, 792.0);

/// Guard against cyclic `Parent` chains in malformed page trees.
const MAX_TREE_DEPTH: usize = 32;

/// Rough glyph advance as a fraction of the font size.
const AVG_GLYPH_WIDTH: f32 = 0.5;

/// Dimensions of one page, in PDF points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    /// Clockwise rotation in degrees (0, 90, 180, 270)
    pub rotation: i64,
}

impl PageGeometry {
    /// JSON record stored in a document's `page_size` sequence.
    pub fn to_record(&self) -> Value {
        json!({
            "width": self.width,
            "height": self.height,
            "rotation": self.rotation,
        })
    }
}

/// Bounding box of the text origins inside one `BT`..`ET` object.
///
/// Right and top edges are estimated from the font size, since glyph
/// widths are not resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBox {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl TextBox {
    fn at(x: f32, y: f32) -> Self {
        Self {
            x_min: x,
            y_min: y,
            x_max: x,
            y_max: y,
        }
    }

    fn include(&mut self, x: f32, y: f32) {
        self.x_min = self.x_min.min(x);
        self.y_min = self.y_min.min(y);
        self.x_max = self.x_max.max(x);
        self.y_max = self.y_max.max(y);
    }

    /// JSON record stored in a document's `page_vertices` sequence:
    /// four corners, counter-clockwise from the bottom-left.
    pub fn to_record(&self) -> Value {
        json!({
            "vertices": [
                {"x": self.x_min, "y": self.y_min},
                {"x": self.x_max, "y": self.y_min},
                {"x": self.x_max, "y": self.y_max},
                {"x": self.x_min, "y": self.y_max},
            ]
        })
    }
}

/// A loaded PDF.
pub struct LopdfBackend {
    doc: LopdfDocument,
}

impl LopdfBackend {
    /// Load from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data)?;
        Ok(Self { doc })
    }

    /// All pages as (page_number → PageId), page 1 first.
    pub fn pages(&self) -> BTreeMap<u32, PageId> {
        self.doc.get_pages()
    }

    /// Get PDF version string.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    /// Extract the text of one page (1-indexed).
    pub fn page_text(&self, page_num: u32) -> Result<String> {
        self.doc
            .extract_text(&[page_num])
            .map_err(|e| Error::TextExtract(format!("Page {}: {}", page_num, e)))
    }

    /// Read the page dimensions, following inherited attributes.
    pub fn page_geometry(&self, page_id: PageId) -> PageGeometry {
        let (width, height) = self
            .inherited(page_id, b"MediaBox")
            .and_then(|media_box| media_box.as_array().ok())
            .and_then(|array| media_box_size(array))
            .unwrap_or(LETTER);

        let rotation = self
            .inherited(page_id, b"Rotate")
            .and_then(|rotate| rotate.as_i64().ok())
            .map(|degrees| degrees.rem_euclid(360))
            .unwrap_or(0);

        PageGeometry {
            width,
            height,
            rotation,
        }
    }

    /// Bounding boxes of the text objects drawn by a page's content stream.
    pub fn text_boxes(&self, page_id: PageId) -> Result<Vec<TextBox>> {
        let data = self.doc.get_page_content(page_id)?;
        let content = Content::decode(&data)?;

        let mut boxes = Vec::new();
        let mut current: Option<TextBox> = None;
        let mut state = TextState::default();

        for op in &content.operations {
            let operands = &op.operands;
            match op.operator.as_str() {
                "BT" => {
                    state.matrix = TextMatrix::default();
                    current = None;
                }
                "ET" => boxes.extend(current.take()),
                "Tf" => {
                    if let Some(size) = operands.get(1).and_then(number) {
                        state.font_size = size;
                    }
                }
                "TL" => {
                    if let Some(leading) = operands.first().and_then(number) {
                        state.leading = leading;
                    }
                }
                "Td" | "TD" => {
                    if let (Some(tx), Some(ty)) =
                        (operands.first().and_then(number), operands.get(1).and_then(number))
                    {
                        if op.operator == "TD" {
                            state.leading = -ty;
                        }
                        state.matrix.translate(tx, ty);
                    }
                }
                "Tm" => {
                    let values: Vec<f32> = operands.iter().filter_map(number).collect();
                    if let [a, b, c, d, e, f] = values[..] {
                        state.matrix = TextMatrix { a, b, c, d, e, f };
                    }
                }
                "T*" => state.next_line(),
                "Tj" | "TJ" => state.show(shown_len(operands.first()), &mut current),
                "'" => {
                    state.next_line();
                    state.show(shown_len(operands.first()), &mut current);
                }
                "\"" => {
                    state.next_line();
                    state.show(shown_len(operands.get(2)), &mut current);
                }
                _ => {}
            }
        }

        // Content streams that never close their last text object.
        boxes.extend(current);
        Ok(boxes)
    }

    /// Look up a page attribute, walking up the page tree when the page
    /// itself does not carry it.
    fn inherited(&self, page_id: PageId, key: &[u8]) -> Option<&Object> {
        let mut node = self.doc.get_dictionary(page_id).ok();
        for _ in 0..MAX_TREE_DEPTH {
            let dict = node?;
            if let Ok(value) = dict.get(key) {
                return match value {
                    Object::Reference(id) => self.doc.get_object(*id).ok(),
                    direct => Some(direct),
                };
            }
            node = dict
                .get(b"Parent")
                .and_then(Object::as_reference)
                .and_then(|parent| self.doc.get_dictionary(parent))
                .ok();
        }
        None
    }
}

#[derive(Debug, Clone, Copy)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl TextMatrix {
    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn scale(&self) -> f32 {
        (self.c * self.c + self.d * self.d).sqrt()
    }
}

#[derive(Debug, Clone, Copy)]
struct TextState {
    matrix: TextMatrix,
    font_size: f32,
    leading: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            matrix: TextMatrix::default(),
            font_size: 12.0,
            leading: 0.0,
        }
    }
}

impl TextState {
    fn next_line(&mut self) {
        let leading = if self.leading > 0.0 {
            self.leading
        } else {
            self.font_size
        };
        self.matrix.translate(0.0, -leading);
    }

    fn show(&self, glyphs: usize, current: &mut Option<TextBox>) {
        let (x, y) = (self.matrix.e, self.matrix.f);
        let height = self.font_size * self.matrix.scale();
        let width = glyphs as f32 * self.font_size * AVG_GLYPH_WIDTH * self.matrix.scale();

        let text_box = current.get_or_insert_with(|| TextBox::at(x, y));
        text_box.include(x, y);
        text_box.include(x + width, y + height);
    }
}

/// Number of string bytes shown by a `Tj`/`TJ`-style operand.
fn shown_len(operand: Option<&Object>) -> usize {
    match operand {
        Some(Object::String(bytes, _)) => bytes.len(),
        Some(Object::Array(items)) => items
            .iter()
            .map(|item| match item {
                Object::String(bytes, _) => bytes.len(),
                _ => 0,
            })
            .sum(),
        _ => 0,
    }
}

fn media_box_size(array: &[Object]) -> Option<(f32, f32)> {
    let values: Vec<f32> = array.iter().filter_map(number).collect();
    match values[..] {
        [llx, lly, urx, ury] => Some(((urx - llx).abs(), (ury - lly).abs())),
        _ => None,
    }
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}
