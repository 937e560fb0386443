//! Loader for the triangulated OBJ subset consumed by the renderer.
//!
//! Face records are expanded into flat, unindexed vertex streams: a vertex
//! shared by several triangles is duplicated into each of them. The streams
//! stay parallel, so for `T` triangles a model holds `9T` position floats,
//! `6T` texcoord floats and `9T` normal floats.

use std::str::SplitWhitespace;

use crate::{
    error::Error,
    vec::{Vec2, Vec3},
};

/// Flattened triangle mesh produced by [`parse_obj`].
///
/// Created once at load time and immutable afterwards; drawables share it
/// by reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    pub positions: Vec<f32>,
    pub texcoords: Vec<f32>,
    pub normals: Vec<f32>,
}

impl Model {
    /// Number of expanded vertices (3 per triangle).
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 9
    }
}

/// Parses a line-oriented OBJ source into a flattened [`Model`].
///
/// Recognized records are `v x y z`, `vt u v`, `vn x y z` and triangular
/// `f a/b/c a/b/c a/b/c` faces with 1-based indices; anything else (comments,
/// object/group/material directives) is skipped. The texcoord v component is
/// flipped (`v' = 1 - v`) to match the texture-sampling origin.
///
/// Faces must reference already-declared table entries; the first malformed
/// or dangling record aborts the load with no partial model.
pub fn parse_obj(source: &str) -> Result<Model, Error> {
    let mut position_table: Vec<Vec3> = Vec::new();
    let mut texcoord_table: Vec<Vec2> = Vec::new();
    let mut normal_table: Vec<Vec3> = Vec::new();
    let mut model = Model::default();

    for (idx, line) in source.lines().enumerate() {
        let line_no = idx + 1;
        let mut fields = line.split_whitespace();

        match fields.next() {
            Some("v") => position_table.push(parse_vec3(&mut fields, line_no)?),
            Some("vt") => {
                let u = parse_f32(fields.next(), line_no)?;
                let v = parse_f32(fields.next(), line_no)?;
                texcoord_table.push(Vec2::new(u, 1.0 - v));
            },
            Some("vn") => normal_table.push(parse_vec3(&mut fields, line_no)?),
            Some("f") => append_face(
                &mut model,
                fields,
                &position_table,
                &texcoord_table,
                &normal_table,
                line_no,
            )?,
            _ => {}, // comments, groups, materials, ...
        }
    }

    Ok(model)
}

/// Synthesizes one flat normal per triangle, replicated across its 3 vertices.
///
/// `normalize(cross(p1 - p0, p2 - p0))` per 9-float chunk. Intended for
/// models that lack `vn` records; never invoked implicitly, the caller
/// decides. A degenerate triangle surfaces the [`Error::Domain`] from the
/// normalization.
pub fn flat_normals(positions: &[f32]) -> Result<Vec<f32>, Error> {
    if positions.len() % 9 != 0 {
        return Err(Error::Format(format!(
            "{} position floats is not a whole number of triangles",
            positions.len()
        )));
    }

    let mut normals = Vec::with_capacity(positions.len());
    for tri in positions.chunks_exact(9) {
        let p0 = Vec3::new(tri[0], tri[1], tri[2]);
        let p1 = Vec3::new(tri[3], tri[4], tri[5]);
        let p2 = Vec3::new(tri[6], tri[7], tri[8]);

        let normal = (p1 - p0).cross(p2 - p0).normalize()?;
        for _ in 0..3 {
            normals.extend_from_slice(&normal.to_array());
        }
    }

    Ok(normals)
}

fn parse_f32(field: Option<&str>, line_no: usize) -> Result<f32, Error> {
    let field = field.ok_or_else(|| Error::malformed_record(line_no, "missing component"))?;
    field
        .parse()
        .map_err(|_| Error::malformed_record(line_no, &format!("bad number {field:?}")))
}

fn parse_vec3(fields: &mut SplitWhitespace, line_no: usize) -> Result<Vec3, Error> {
    let x = parse_f32(fields.next(), line_no)?;
    let y = parse_f32(fields.next(), line_no)?;
    let z = parse_f32(fields.next(), line_no)?;
    Ok(Vec3::new(x, y, z))
}

fn append_face(
    model: &mut Model,
    fields: SplitWhitespace,
    position_table: &[Vec3],
    texcoord_table: &[Vec2],
    normal_table: &[Vec3],
    line_no: usize,
) -> Result<(), Error> {
    let groups: Vec<&str> = fields.collect();
    if groups.len() != 3 {
        return Err(Error::face_vertex_count(line_no, groups.len()));
    }

    for group in groups {
        let (vi, ti, ni) = parse_index_triple(group, line_no)?;

        let position = lookup(position_table, vi, "v", line_no)?;
        model.positions.extend_from_slice(&position.to_array());

        let texcoord = lookup(texcoord_table, ti, "vt", line_no)?;
        model.texcoords.extend_from_slice(&texcoord.to_array());

        let normal = lookup(normal_table, ni, "vn", line_no)?;
        model.normals.extend_from_slice(&normal.to_array());
    }

    Ok(())
}

fn parse_index_triple(group: &str, line_no: usize) -> Result<(usize, usize, usize), Error> {
    let mut parts = group.split('/');

    let vi = parse_index(parts.next(), line_no)?;
    let ti = parse_index(parts.next(), line_no)?;
    let ni = parse_index(parts.next(), line_no)?;

    if parts.next().is_some() {
        return Err(Error::malformed_record(
            line_no,
            &format!("face vertex {group:?} has more than 3 indices"),
        ));
    }

    Ok((vi, ti, ni))
}

fn parse_index(part: Option<&str>, line_no: usize) -> Result<usize, Error> {
    let part = part.ok_or_else(|| Error::malformed_record(line_no, "missing face index"))?;
    part.parse()
        .map_err(|_| Error::malformed_record(line_no, &format!("bad face index {part:?}")))
}

/// Resolves a 1-based index against the table accumulated so far.
fn lookup<T: Copy>(table: &[T], index: usize, kind: &str, line_no: usize) -> Result<T, Error> {
    if index == 0 || index > table.len() {
        return Err(Error::dangling_index(line_no, kind, index, table.len()));
    }
    Ok(table[index - 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE_OBJ: &str = "\
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vt 1 0
vt 0 1
vn 0 0 1
vn 0 0 1
vn 0 0 1
f 1/1/1 2/2/2 3/3/3
";

    #[test]
    fn test_parse_single_triangle() {
        let model = parse_obj(TRIANGLE_OBJ).unwrap();

        assert_eq!(model.positions, vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
        // v components flipped against the texture origin
        assert_eq!(model.texcoords, vec![0.0, 1.0, 1.0, 1.0, 0.0, 0.0]);
        assert_eq!(model.normals, vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
        assert_eq!(model.triangle_count(), 1);
        assert_eq!(model.vertex_count(), 3);
    }

    #[test]
    fn test_parallel_stream_lengths() {
        // two triangles sharing vertices; shared vertices are duplicated
        let source = "\
v 0 0 0
v 1 0 0
v 0 1 0
v 1 1 0
vt 0 0
vt 1 0
vt 0 1
vt 1 1
vn 0 0 1
f 1/1/1 2/2/1 3/3/1
f 2/2/1 4/4/1 3/3/1
";
        let model = parse_obj(source).unwrap();
        let triangles = model.triangle_count();

        assert_eq!(triangles, 2);
        assert_eq!(model.positions.len(), 9 * triangles);
        assert_eq!(model.texcoords.len(), 6 * triangles);
        assert_eq!(model.normals.len(), 9 * triangles);
    }

    #[test]
    fn test_unrecognized_records_are_ignored() {
        let source = format!(
            "# a comment\no thing\ng group\ns off\nusemtl skin\nmtllib things.mtl\n{TRIANGLE_OBJ}"
        );
        let model = parse_obj(&source).unwrap();

        assert_eq!(model.triangle_count(), 1);
    }

    #[test]
    fn test_face_index_past_table_end_fails() {
        let source = "\
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vn 0 0 1
f 4/1/1 2/1/1 3/1/1
";
        let result = parse_obj(source);
        assert!(matches!(result, Err(Error::IndexOutOfRange(_))));
    }

    #[test]
    fn test_no_forward_references() {
        // the face appears before its vn record
        let source = "\
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
f 1/1/1 2/1/1 3/1/1
vn 0 0 1
";
        let result = parse_obj(source);
        assert!(matches!(result, Err(Error::IndexOutOfRange(_))));
    }

    #[test]
    fn test_zero_index_fails() {
        let source = "\
v 0 0 0
vt 0 0
vn 0 0 1
f 0/1/1 1/1/1 1/1/1
";
        let result = parse_obj(source);
        assert!(matches!(result, Err(Error::IndexOutOfRange(_))));
    }

    #[test]
    fn test_quad_face_fails_without_triangulation() {
        let source = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vn 0 0 1
f 1/1/1 2/1/1 3/1/1 4/1/1
";
        let result = parse_obj(source);
        assert!(matches!(result, Err(Error::Format(_))));
    }

    #[test]
    fn test_malformed_number_reports_line() {
        let source = "v 0 0 0\nv 1 zero 0\n";
        let err = parse_obj(source).unwrap_err();

        match err {
            Error::Format(message) => assert!(message.contains("line 2"), "{message}"),
            other => panic!("expected format error, got {other:?}"),
        }
    }

    #[test]
    fn test_incomplete_face_triple_fails() {
        let source = "\
v 0 0 0
vt 0 0
vn 0 0 1
f 1/1 1/1/1 1/1/1
";
        let result = parse_obj(source);
        assert!(matches!(result, Err(Error::Format(_))));
    }

    #[test]
    fn test_flat_normals_are_unit_length_and_replicated() {
        let model = parse_obj(TRIANGLE_OBJ).unwrap();
        let normals = flat_normals(&model.positions).unwrap();

        assert_eq!(normals.len(), model.positions.len());
        // counter-clockwise triangle in the xy plane faces +z
        assert_eq!(&normals[0..3], &[0.0, 0.0, 1.0]);
        assert_eq!(&normals[0..3], &normals[3..6]);
        assert_eq!(&normals[0..3], &normals[6..9]);

        for normal in normals.chunks_exact(3) {
            let length = Vec3::new(normal[0], normal[1], normal[2]).length();
            assert!((length - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_flat_normals_degenerate_triangle_fails() {
        let positions = [0.0; 9]; // all three corners coincide
        assert!(matches!(flat_normals(&positions), Err(Error::Domain(_))));
    }

    #[test]
    fn test_flat_normals_partial_triangle_fails() {
        let positions = [0.0; 6];
        assert!(matches!(flat_normals(&positions), Err(Error::Format(_))));
    }
}
