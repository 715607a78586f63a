//! Beams displacement program: the standard surface extended with noise.

use bytemuck::{Pod, Zeroable};

use super::{InsertionPoint, ShaderProgram, ShaderTemplate};

/// Beam parameters uniform (binding 1, declared by the header fragment)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct BeamParams {
    pub time: f32,
    pub speed: f32,
    pub noise_intensity: f32,
    pub scale: f32,
}

const BEAM_HEADER: &str = "\
struct BeamParams {
    time: f32,
    speed: f32,
    noise_intensity: f32,
    scale: f32,
};

@group(0) @binding(1)
var<uniform> beam: BeamParams;
";

const NOISE_LIBRARY: &str = include_str!("../shaders/noise.wgsl");

const DISPLACEMENT_FUNCTIONS: &str = "\
fn displaced_offset(pos: vec3<f32>, uv: vec2<f32>) -> f32 {
    let noise_pos = vec3<f32>(pos.x * 0.0, pos.y - uv.y, pos.z + beam.time * beam.speed * 3.0) * beam.scale;
    return classic_noise(noise_pos);
}

fn displaced_position(pos: vec3<f32>, uv: vec2<f32>) -> vec3<f32> {
    var moved = pos;
    moved.z += displaced_offset(pos, uv);
    return moved;
}

fn displaced_normal(pos: vec3<f32>, uv: vec2<f32>) -> vec3<f32> {
    let current = displaced_position(pos, uv);
    let next_x = displaced_position(pos + vec3<f32>(0.01, 0.0, 0.0), uv);
    let next_y = displaced_position(pos + vec3<f32>(0.0, -0.01, 0.0), uv);
    let tangent_x = normalize(next_x - current);
    let tangent_y = normalize(next_y - current);
    return normalize(cross(tangent_y, tangent_x));
}
";

const BEGIN_NORMAL: &str = "    object_normal = displaced_normal(position, uv);";

const BEGIN_VERTEX: &str = "    transformed.z += displaced_offset(transformed, uv);";

const DITHERING: &str = "\
    let random_noise = value_noise(frag_coord.xy);
    frag_color = vec4<f32>(frag_color.rgb - random_noise / 15.0 * beam.noise_intensity, frag_color.a);
";

/// Standard surface extended with vertex displacement, rebuilt normals and dithering
pub fn beams_program() -> ShaderProgram {
    ShaderProgram::new(ShaderTemplate::standard())
        .insert(InsertionPoint::Header, BEAM_HEADER)
        .insert(InsertionPoint::Header, NOISE_LIBRARY)
        .insert(InsertionPoint::VertexHeader, DISPLACEMENT_FUNCTIONS)
        .insert(InsertionPoint::BeginNormal, BEGIN_NORMAL)
        .insert(InsertionPoint::BeginVertex, BEGIN_VERTEX)
        .insert(InsertionPoint::DitheringFragment, DITHERING)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(source: &str) -> naga::Module {
        let module = naga::front::wgsl::parse_str(source)
            .unwrap_or_else(|e| panic!("{}", e.emit_to_string(source)));
        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        )
        .validate(&module)
        .unwrap_or_else(|e| panic!("validation failed: {e:?}"));
        module
    }

    #[test]
    fn test_standard_template_compiles_alone() {
        let source = ShaderProgram::new(ShaderTemplate::standard())
            .build()
            .unwrap();
        validate(&source);
    }

    #[test]
    fn test_beams_program_compiles() {
        let source = beams_program().build().unwrap();
        let module = validate(&source);

        let stages: Vec<_> = module.entry_points.iter().map(|e| e.stage).collect();
        assert!(stages.contains(&naga::ShaderStage::Vertex));
        assert!(stages.contains(&naga::ShaderStage::Fragment));
    }

    #[test]
    fn test_beams_program_splices_in_order() {
        let source = beams_program().build().unwrap();
        let pos = |needle: &str| {
            source
                .find(needle)
                .unwrap_or_else(|| panic!("missing {needle}"))
        };

        assert!(pos("var<uniform> beam") < pos("fn classic_noise"));
        assert!(pos("fn displaced_offset") < pos("fn vs_main"));
        assert!(pos("object_normal = displaced_normal") < pos("transformed.z +="));
        assert!(pos("let random_noise") < pos("return frag_color"));
    }

    #[test]
    fn test_beam_params_layout() {
        assert_eq!(std::mem::size_of::<BeamParams>(), 16);
        let params = BeamParams {
            time: 1.0,
            speed: 2.0,
            noise_intensity: 1.75,
            scale: 0.2,
        };
        let words: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&params));
        assert_eq!(words, &[1.0, 2.0, 1.75, 0.2]);
    }
}
