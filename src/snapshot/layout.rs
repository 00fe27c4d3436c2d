//! Snapshot grid geometry and scene construction
//!
//! The layout is fixed: a 1400-wide canvas, a coloured header band, a
//! four-column grid of stock cells, and a footer line. Everything is
//! expressed as a flat display list ([`Scene`]) so the geometry can be tested
//! without rasterizing.

pub const CANVAS_WIDTH: u32 = 1400;
pub const PADDING: u32 = 60;
pub const ROW_HEIGHT: u32 = 50;
pub const HEADER_HEIGHT: u32 = 100;
pub const FOOTER_HEIGHT: u32 = 60;
pub const COLUMNS: u32 = 4;
/// Inset of a cell's box inside its grid slot, per side
pub const CELL_INSET: f32 = 10.0;
/// Horizontal text margin inside a cell box
pub const CELL_TEXT_MARGIN: f32 = 15.0;

pub const BACKGROUND: &str = "#fafafa";
pub const HEADER_FILL: &str = "#1e40af";
pub const CELL_FILL: &str = "#ffffff";
pub const CELL_STROKE: &str = "#d1d5db";
pub const NAME_COLOR: &str = "#374151";
pub const CODE_COLOR: &str = "#1e40af";
pub const FOOTER_COLOR: &str = "#6b7280";

pub const SANS_FAMILY: &str = "Helvetica, Arial, 'Noto Sans CJK SC', 'PingFang SC', 'Microsoft YaHei', sans-serif";
pub const MONO_FAMILY: &str = "'JetBrains Mono', monospace";

/// A stock as shown on the snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotStock {
    pub code: String,
    pub name: String,
}

/// Canvas dimensions for a given stock count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotLayout {
    pub stock_count: usize,
    pub rows: u32,
    pub width: u32,
    pub height: u32,
}

/// Cell box for one stock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellBox {
    pub row: u32,
    pub col: u32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl CellBox {
    /// Baseline shared by the name and code text
    pub fn text_baseline(&self) -> f32 {
        self.y + self.height / 2.0 + 6.0
    }
}

impl SnapshotLayout {
    pub fn for_count(stock_count: usize) -> Self {
        // Saturates; the canvas allocation rejects anything that large
        let rows = u32::try_from(stock_count.div_ceil(COLUMNS as usize)).unwrap_or(u32::MAX);
        let height = rows
            .saturating_mul(ROW_HEIGHT)
            .saturating_add(HEADER_HEIGHT + FOOTER_HEIGHT + PADDING * 2);
        Self {
            stock_count,
            rows,
            width: CANVAS_WIDTH,
            height,
        }
    }

    /// Width of one grid column
    pub fn column_width(&self) -> f32 {
        (self.width - PADDING * 2) as f32 / COLUMNS as f32
    }

    /// Geometry of the cell for stock `index`
    pub fn cell(&self, index: usize) -> CellBox {
        let row = u32::try_from(index / COLUMNS as usize).unwrap_or(u32::MAX);
        let col = (index % COLUMNS as usize) as u32;
        let column_width = self.column_width();
        let grid_top = (HEADER_HEIGHT + PADDING) as f32;
        CellBox {
            row,
            col,
            x: PADDING as f32 + col as f32 * column_width + CELL_INSET,
            y: grid_top + row as f32 * ROW_HEIGHT as f32 + CELL_INSET,
            width: column_width - CELL_INSET * 2.0,
            height: ROW_HEIGHT as f32 - CELL_INSET,
        }
    }
}

/// Horizontal anchoring of a text run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

/// One drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: &'static str,
    },
    StrokeRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: &'static str,
        line_width: f32,
    },
    Text {
        x: f32,
        y: f32,
        anchor: Anchor,
        size: f32,
        bold: bool,
        family: &'static str,
        color: &'static str,
        content: String,
    },
}

/// A display list ready to be serialized
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub ops: Vec<DrawOp>,
}

/// Lay out a snapshot of `stocks`
///
/// `generated_at` is the preformatted local timestamp for the footer.
pub fn compose(
    stocks: &[SnapshotStock],
    strategy_label: &str,
    filter_label: &str,
    generated_at: &str,
) -> Scene {
    let layout = SnapshotLayout::for_count(stocks.len());
    let width = layout.width as f32;
    let height = layout.height as f32;
    let mut ops = Vec::with_capacity(4 + stocks.len() * 4);

    ops.push(DrawOp::FillRect {
        x: 0.0,
        y: 0.0,
        width,
        height,
        color: BACKGROUND,
    });
    ops.push(DrawOp::FillRect {
        x: 0.0,
        y: 0.0,
        width,
        height: HEADER_HEIGHT as f32,
        color: HEADER_FILL,
    });
    ops.push(DrawOp::Text {
        x: width / 2.0,
        y: 60.0,
        anchor: Anchor::Middle,
        size: 36.0,
        bold: true,
        family: SANS_FAMILY,
        color: "#ffffff",
        content: format!("策略: {} | {}", strategy_label, filter_label),
    });

    for (i, stock) in stocks.iter().enumerate() {
        let cell = layout.cell(i);
        let baseline = cell.text_baseline();
        ops.push(DrawOp::FillRect {
            x: cell.x,
            y: cell.y,
            width: cell.width,
            height: cell.height,
            color: CELL_FILL,
        });
        ops.push(DrawOp::StrokeRect {
            x: cell.x,
            y: cell.y,
            width: cell.width,
            height: cell.height,
            color: CELL_STROKE,
            line_width: 1.0,
        });
        ops.push(DrawOp::Text {
            x: cell.x + CELL_TEXT_MARGIN,
            y: baseline,
            anchor: Anchor::Start,
            size: 18.0,
            bold: true,
            family: SANS_FAMILY,
            color: NAME_COLOR,
            content: stock.name.clone(),
        });
        ops.push(DrawOp::Text {
            x: cell.x + cell.width - CELL_TEXT_MARGIN,
            y: baseline,
            anchor: Anchor::End,
            size: 16.0,
            bold: false,
            family: MONO_FAMILY,
            color: CODE_COLOR,
            content: stock.code.clone(),
        });
    }

    ops.push(DrawOp::Text {
        x: width / 2.0,
        y: height - 25.0,
        anchor: Anchor::Middle,
        size: 16.0,
        bold: false,
        family: SANS_FAMILY,
        color: FOOTER_COLOR,
        content: format!("共 {} 只股票 | 生成时间: {}", stocks.len(), generated_at),
    });

    Scene {
        width: layout.width,
        height: layout.height,
        ops,
    }
}
