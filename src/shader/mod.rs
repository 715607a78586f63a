//! Shader program descriptor: a base template plus ordered insertions.
//!
//! A template is WGSL source carrying marker lines `// #include <name>`, one
//! per [`InsertionPoint`]. A [`ShaderProgram`] lists `(point, fragment)` pairs
//! and splices them in after their marker at build time. Markers are matched
//! as whole lines, so the template text around them is never rewritten.

mod beams;

pub use beams::{beams_program, BeamParams};

use std::borrow::Cow;

use crate::error::{BeamsError, Result};

/// Named place in a template where fragments may be inserted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsertionPoint {
    /// Module scope, before everything else (shared declarations)
    Header,
    /// Module scope, before the vertex entry point
    VertexHeader,
    /// Module scope, before the fragment entry point
    FragmentHeader,
    /// Vertex stage, after `transformed` is initialised from `position`
    BeginVertex,
    /// Vertex stage, after `object_normal` is initialised from the attribute
    BeginNormal,
    /// Fragment stage, just before `frag_color` is returned
    DitheringFragment,
}

impl InsertionPoint {
    pub const ALL: [InsertionPoint; 6] = [
        InsertionPoint::Header,
        InsertionPoint::VertexHeader,
        InsertionPoint::FragmentHeader,
        InsertionPoint::BeginVertex,
        InsertionPoint::BeginNormal,
        InsertionPoint::DitheringFragment,
    ];

    /// Marker line that identifies this point in a template
    pub fn marker(self) -> &'static str {
        match self {
            InsertionPoint::Header => "// #include <header>",
            InsertionPoint::VertexHeader => "// #include <vertex_header>",
            InsertionPoint::FragmentHeader => "// #include <fragment_header>",
            InsertionPoint::BeginVertex => "// #include <begin_vertex>",
            InsertionPoint::BeginNormal => "// #include <begin_normal>",
            InsertionPoint::DitheringFragment => "// #include <dithering_fragment>",
        }
    }

    fn from_line(line: &str) -> Option<Self> {
        let line = line.trim();
        Self::ALL.into_iter().find(|p| p.marker() == line)
    }
}

/// Base WGSL source with insertion markers
#[derive(Debug, Clone)]
pub struct ShaderTemplate {
    pub label: Cow<'static, str>,
    pub source: Cow<'static, str>,
}

impl ShaderTemplate {
    pub fn new(
        label: impl Into<Cow<'static, str>>,
        source: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            label: label.into(),
            source: source.into(),
        }
    }

    /// Lit standard surface (directional + ambient light, fog)
    pub fn standard() -> Self {
        Self::new("standard", include_str!("../shaders/standard.wgsl"))
    }

    /// Check that every insertion point has exactly one marker line
    pub fn validate(&self) -> Result<()> {
        for point in InsertionPoint::ALL {
            let count = self
                .source
                .lines()
                .filter(|line| line.trim() == point.marker())
                .count();
            match count {
                1 => {}
                0 => {
                    return Err(BeamsError::MissingInsertionPoint {
                        template: self.label.to_string(),
                        marker: point.marker(),
                    })
                }
                count => {
                    return Err(BeamsError::DuplicateInsertionPoint {
                        template: self.label.to_string(),
                        marker: point.marker(),
                        count,
                    })
                }
            }
        }
        Ok(())
    }
}

/// Template plus ordered insertions, composed into WGSL by [`ShaderProgram::build`]
#[derive(Debug, Clone)]
pub struct ShaderProgram {
    template: ShaderTemplate,
    insertions: Vec<(InsertionPoint, Cow<'static, str>)>,
}

impl ShaderProgram {
    pub fn new(template: ShaderTemplate) -> Self {
        Self {
            template,
            insertions: Vec::new(),
        }
    }

    /// Append a fragment at `point`; fragments at one point keep insertion order
    pub fn insert(
        mut self,
        point: InsertionPoint,
        fragment: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.insertions.push((point, fragment.into()));
        self
    }

    pub fn label(&self) -> &str {
        &self.template.label
    }

    pub fn insertions(&self) -> &[(InsertionPoint, Cow<'static, str>)] {
        &self.insertions
    }

    /// Compose the final WGSL source
    pub fn build(&self) -> Result<String> {
        self.template.validate()?;

        let extra: usize = self.insertions.iter().map(|(_, f)| f.len() + 1).sum();
        let mut out = String::with_capacity(self.template.source.len() + extra);

        for line in self.template.source.lines() {
            out.push_str(line);
            out.push('\n');

            let Some(point) = InsertionPoint::from_line(line) else {
                continue;
            };
            for (_, fragment) in self.insertions.iter().filter(|(p, _)| *p == point) {
                out.push_str(fragment);
                if !fragment.ends_with('\n') {
                    out.push('\n');
                }
            }
        }

        Ok(out)
    }
}
