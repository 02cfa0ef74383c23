//! Seam to the external layout and drawing collaborator

use std::io::{self, Write};

use generational_arena::Index;
use tracing::instrument;

use crate::arena::ValueTree;
use crate::errors::{GraphError, GraphResult};
use crate::export::{RenderOptions, RenderPayload, BASE_NODE_SIZE};

/// A rendering collaborator: receives the aggregated graph plus the
/// label, size and color maps and draws it. Layout and pixel mapping live
/// entirely behind this trait.
pub trait Renderer {
    fn draw(&mut self, payload: &RenderPayload<'_>) -> io::Result<()>;
}

impl ValueTree {
    /// Build the subtree at `root`, assemble the render payload and hand
    /// it to the renderer.
    #[instrument(level = "debug", skip(self, renderer))]
    pub fn render<R: Renderer>(
        &mut self,
        root: Index,
        renderer: &mut R,
        options: &RenderOptions,
    ) -> GraphResult<()> {
        self.build(root)?;
        let snapshot = self.snapshot(root).ok_or(GraphError::UnknownNode)?;
        let payload = RenderPayload::new(snapshot, options);
        renderer.draw(&payload)?;
        Ok(())
    }
}

/// Writes the payload as GraphViz DOT text.
///
/// The DOT consumer still owns layout; node widths are the payload sizes
/// rescaled to inches.
pub struct DotRenderer<W: Write> {
    out: W,
}

impl<W: Write> DotRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Unwrap the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for DotRenderer<W> {
    fn draw(&mut self, payload: &RenderPayload<'_>) -> io::Result<()> {
        writeln!(self.out, "digraph hierarchy {{")?;
        writeln!(
            self.out,
            "  size=\"{},{}\";",
            payload.figsize.0, payload.figsize.1
        )?;
        writeln!(self.out, "  node [shape=circle, style=filled];")?;

        for (name, _) in payload.snapshot.nodes() {
            let label = payload.labels.get(name).map(String::as_str).unwrap_or(name);
            let color = payload
                .colors
                .get(name)
                .map(String::as_str)
                .unwrap_or_default();
            let size = payload.sizes.get(name).copied().unwrap_or(BASE_NODE_SIZE);
            writeln!(
                self.out,
                "  \"{}\" [label=\"{}\", fillcolor=\"{}\", width={:.2}];",
                escape(name),
                escape(label),
                escape(color),
                size / 1000.0
            )?;
        }

        for (source, target) in payload.snapshot.edges() {
            writeln!(
                self.out,
                "  \"{}\" -> \"{}\";",
                escape(source),
                escape(target)
            )?;
        }

        writeln!(self.out, "}}")?;
        Ok(())
    }
}

/// Escape special characters for quoted DOT strings.
fn escape(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
