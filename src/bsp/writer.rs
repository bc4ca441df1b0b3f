// src/bsp/writer.rs

use std::fs::File;
use std::io::{self, BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

use byteorder::{WriteBytesExt, LE};
use log::info;

use crate::bsp::{CompileContext, IBSP_IDENT, IBSP_VERSION, NAME_LEN};
use crate::error::Result;
use crate::utils::{BoundingBox, Point3D};

/// Receives the finished arrays at the end of a compile.
pub trait BspSink {
    fn write_bsp(&mut self, ctx: &CompileContext) -> Result<()>;

    /// Per-surface extra data. Nothing to write unless the sink cares.
    fn write_surface_extras(&mut self, _ctx: &CompileContext) -> Result<()> {
        Ok(())
    }
}

/// Lump slots of a version 46 file, in directory order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lump {
    Entities,
    Shaders,
    Planes,
    Nodes,
    Leafs,
    LeafSurfaces,
    LeafBrushes,
    Models,
    Brushes,
    BrushSides,
    DrawVerts,
    DrawIndexes,
    Fogs,
    Surfaces,
    Lightmaps,
    LightGrid,
    Visibility,
}

pub const NUM_LUMPS: usize = 17;
pub const HEADER_SIZE: u64 = 8 + NUM_LUMPS as u64 * 8;

const LUMP_ORDER: [Lump; NUM_LUMPS] = [
    Lump::Entities,
    Lump::Shaders,
    Lump::Planes,
    Lump::Nodes,
    Lump::Leafs,
    Lump::LeafSurfaces,
    Lump::LeafBrushes,
    Lump::Models,
    Lump::Brushes,
    Lump::BrushSides,
    Lump::DrawVerts,
    Lump::DrawIndexes,
    Lump::Fogs,
    Lump::Surfaces,
    Lump::Lightmaps,
    Lump::LightGrid,
    Lump::Visibility,
];

/// Writes an `IBSP` version 46 file.
///
/// Layout (all little-endian):
///
/// ```text
/// offset  field      type / size
/// ------  ---------  ------------
///  0-3    ident      "IBSP"
///  4-7    version    i32 (46)
///  8-143  lumps      17 x { offset i32, length i32 }
/// ```
/// Every lump starts on a 4-byte boundary. Lumps owned by other stages
/// (draw verts, surfaces, lightmaps, light grid, visibility) are empty.
pub struct IbspWriter<W: Write + Seek> {
    writer: W,
}

impl IbspWriter<BufWriter<File>> {
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        info!("Writing {}", path.as_ref().display());
        Ok(IbspWriter::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write + Seek> IbspWriter<W> {
    pub fn new(writer: W) -> Self {
        IbspWriter { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_lump(&mut self, ctx: &CompileContext, lump: Lump) -> io::Result<()> {
        let w = &mut self.writer;
        match lump {
            Lump::Entities => {
                w.write_all(ctx.entity_data.as_bytes())?;
                w.write_u8(0)?;
            }
            Lump::Shaders => {
                for shader in ctx.shaders.as_slice() {
                    write_name(w, &shader.shader)?;
                    w.write_i32::<LE>(shader.surface_flags)?;
                    w.write_i32::<LE>(shader.content_flags)?;
                }
            }
            Lump::Planes => {
                for plane in &ctx.planes {
                    write_vec(w, plane.normal)?;
                    w.write_f32::<LE>(plane.dist)?;
                }
            }
            Lump::Nodes => {
                for node in &ctx.nodes {
                    w.write_i32::<LE>(node.plane_num as i32)?;
                    w.write_i32::<LE>(node.children[0].to_signed())?;
                    w.write_i32::<LE>(node.children[1].to_signed())?;
                    write_int_bounds(w, &node.bounds)?;
                }
            }
            Lump::Leafs => {
                for leaf in &ctx.leafs {
                    w.write_i32::<LE>(leaf.cluster)?;
                    w.write_i32::<LE>(leaf.area)?;
                    write_int_bounds(w, &leaf.bounds)?;
                    w.write_i32::<LE>(leaf.first_leaf_surface as i32)?;
                    w.write_i32::<LE>(leaf.num_leaf_surfaces as i32)?;
                    w.write_i32::<LE>(leaf.first_leaf_brush as i32)?;
                    w.write_i32::<LE>(leaf.num_leaf_brushes as i32)?;
                }
            }
            Lump::LeafSurfaces => write_indexes(w, ctx.leaf_surfaces.as_slice())?,
            Lump::LeafBrushes => write_indexes(w, ctx.leaf_brushes.as_slice())?,
            Lump::Models => {
                for model in &ctx.models {
                    write_vec(w, model.bounds.mins)?;
                    write_vec(w, model.bounds.maxs)?;
                    w.write_i32::<LE>(model.first_surface as i32)?;
                    w.write_i32::<LE>(model.num_surfaces as i32)?;
                    w.write_i32::<LE>(model.first_brush as i32)?;
                    w.write_i32::<LE>(model.num_brushes as i32)?;
                }
            }
            Lump::Brushes => {
                for brush in &ctx.brushes {
                    w.write_i32::<LE>(brush.first_side as i32)?;
                    w.write_i32::<LE>(brush.num_sides as i32)?;
                    w.write_i32::<LE>(brush.shader_num as i32)?;
                }
            }
            Lump::BrushSides => {
                for side in &ctx.brush_sides {
                    w.write_i32::<LE>(side.plane_num as i32)?;
                    w.write_i32::<LE>(side.shader_num as i32)?;
                }
            }
            Lump::DrawIndexes => {
                for index in &ctx.draw_indexes {
                    w.write_i32::<LE>(*index)?;
                }
            }
            Lump::Fogs => {
                for fog in &ctx.fogs {
                    write_name(w, &fog.shader)?;
                    w.write_i32::<LE>(fog.brush_num.map_or(-1, |b| b as i32))?;
                    w.write_i32::<LE>(fog.visible_side.map_or(-1, |s| s as i32))?;
                }
            }
            Lump::DrawVerts
            | Lump::Surfaces
            | Lump::Lightmaps
            | Lump::LightGrid
            | Lump::Visibility => {}
        }
        Ok(())
    }

    fn write_file(&mut self, ctx: &CompileContext) -> io::Result<()> {
        let start = self.writer.stream_position()?;
        self.writer.write_all(&[0u8; HEADER_SIZE as usize])?;

        let mut directory = [(0i32, 0i32); NUM_LUMPS];
        for (slot, lump) in LUMP_ORDER.iter().enumerate() {
            let offset = self.writer.stream_position()?;
            self.write_lump(ctx, *lump)?;
            let end = self.writer.stream_position()?;
            directory[slot] = ((offset - start) as i32, (end - offset) as i32);

            let padding = (4 - (end - start) % 4) % 4;
            self.writer.write_all(&[0u8; 3][..padding as usize])?;
        }
        let file_end = self.writer.stream_position()?;

        self.writer.seek(SeekFrom::Start(start))?;
        self.writer.write_all(IBSP_IDENT)?;
        self.writer.write_i32::<LE>(IBSP_VERSION)?;
        for (offset, length) in directory {
            self.writer.write_i32::<LE>(offset)?;
            self.writer.write_i32::<LE>(length)?;
        }
        self.writer.seek(SeekFrom::Start(file_end))?;
        self.writer.flush()
    }
}

impl<W: Write + Seek> BspSink for IbspWriter<W> {
    fn write_bsp(&mut self, ctx: &CompileContext) -> Result<()> {
        self.write_file(ctx)?;
        Ok(())
    }
}

/// Writes a name NUL-padded (and if need be clipped) to 64 bytes.
fn write_name<W: Write>(w: &mut W, name: &str) -> io::Result<()> {
    let mut buf = [0u8; NAME_LEN];
    for (i, &b) in name.as_bytes().iter().take(NAME_LEN - 1).enumerate() {
        buf[i] = b;
    }
    w.write_all(&buf)
}

fn write_vec<W: Write>(w: &mut W, v: Point3D) -> io::Result<()> {
    for c in v.to_array() {
        w.write_f32::<LE>(c)?;
    }
    Ok(())
}

// Node and leaf bounds are stored as integers.
fn write_int_bounds<W: Write>(w: &mut W, bounds: &BoundingBox) -> io::Result<()> {
    for c in bounds.mins.to_array().into_iter().chain(bounds.maxs.to_array()) {
        w.write_i32::<LE>(c as i32)?;
    }
    Ok(())
}

fn write_indexes<W: Write>(w: &mut W, indexes: &[usize]) -> io::Result<()> {
    for &index in indexes {
        w.write_i32::<LE>(index as i32)?;
    }
    Ok(())
}
