use std::collections::{HashMap, HashSet};

use egui::epaint::{Mesh, Vertex, WHITE_UV};
use egui::{Color32, Painter, Pos2, Rect, Shape};
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, VertexBuffers};

use crate::document::RenderItem;
use crate::error::RenderError;
use crate::smoother::SmoothPath;
use crate::stroke::StrokeId;

/// Maximum distance between a flattened curve and the true curve, in points
const FILL_TOLERANCE: f32 = 0.1;

fn to_lyon_path(path: &SmoothPath) -> Option<Path> {
    let SmoothPath::Curve {
        start,
        segments,
        closed,
    } = path
    else {
        return None;
    };

    let mut builder = Path::builder();
    builder.begin(point(start.x, start.y));
    for segment in segments {
        builder.quadratic_bezier_to(point(segment.ctrl.x, segment.ctrl.y), point(segment.to.x, segment.to.y));
    }
    builder.end(*closed);
    Some(builder.build())
}

/// Tessellate a smooth path into a filled mesh with the non-zero rule.
///
/// An empty path yields an empty mesh.
pub fn tessellate(path: &SmoothPath, color: Color32) -> Result<Mesh, RenderError> {
    let Some(lyon_path) = to_lyon_path(path) else {
        return Ok(Mesh::default());
    };

    let mut geometry: VertexBuffers<Pos2, u32> = VertexBuffers::new();
    let options = FillOptions::tolerance(FILL_TOLERANCE).with_fill_rule(FillRule::NonZero);
    FillTessellator::new().tessellate_path(
        &lyon_path,
        &options,
        &mut BuffersBuilder::new(&mut geometry, |vertex: FillVertex<'_>| {
            let p = vertex.position();
            Pos2::new(p.x, p.y)
        }),
    )?;

    Ok(Mesh {
        indices: geometry.indices,
        vertices: geometry
            .vertices
            .into_iter()
            .map(|pos| Vertex {
                pos,
                uv: WHITE_UV,
                color,
            })
            .collect(),
        ..Default::default()
    })
}

/// Paints the stroke list, caching the meshes of committed strokes
#[derive(Debug, Default)]
pub struct Renderer {
    meshes: HashMap<StrokeId, Mesh>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cached_meshes(&self) -> usize {
        self.meshes.len()
    }

    fn mesh_for(&mut self, item: &RenderItem<'_>) -> Result<Mesh, RenderError> {
        match item.stroke_id {
            Some(id) => {
                if let Some(mesh) = self.meshes.get(&id) {
                    return Ok(mesh.clone());
                }
                let mesh = tessellate(item.path, item.color)?;
                self.meshes.insert(id, mesh.clone());
                Ok(mesh)
            }
            None => tessellate(item.path, item.color),
        }
    }

    /// Drop cached meshes of strokes that are no longer drawn. Undone strokes
    /// are re-tessellated if they come back.
    fn retain_visible(&mut self, items: &[RenderItem<'_>]) {
        let visible: HashSet<StrokeId> = items.iter().filter_map(|item| item.stroke_id).collect();
        self.meshes.retain(|id, _| visible.contains(id));
    }

    /// Paints the background then every item in order
    pub fn render(&mut self, painter: &Painter, rect: Rect, background: Color32, items: &[RenderItem<'_>]) {
        painter.rect_filled(rect, 0.0, background);

        self.retain_visible(items);
        for item in items {
            if item.path.is_empty() {
                continue;
            }
            match self.mesh_for(item) {
                Ok(mesh) => {
                    painter.add(Shape::mesh(mesh));
                }
                Err(err) => log::error!("Skipping stroke: {err}"),
            }
        }
    }
}
