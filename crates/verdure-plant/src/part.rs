use log::{debug, warn};
use serde::{Deserialize, Serialize};
use verdure_core::Result;
use verdure_geometry::{ControlPoint, Curve, SamplingParams};
use verdure_math::{DVec3, Point3, Transform, Vector3};
use verdure_mesh::{CrossSectionLoft, LoftOptions, TriangleMesh};

/// Linear RGB in `[0, 1]`.
pub type Color = [f32; 3];

/// Which of a part's three curves an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurveRole {
    LeftRail,
    RightRail,
    CrossSection,
}

impl CurveRole {
    pub const ALL: [CurveRole; 3] = [
        CurveRole::LeftRail,
        CurveRole::RightRail,
        CurveRole::CrossSection,
    ];
}

/// A lofted plant component: two rails, a half cross-section, a local
/// placement and the mesh generated from them.
///
/// The mesh is regenerated lazily by [`PlantPart::mesh`] after any curve edit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlantPart {
    name: String,
    left_rail: Curve,
    right_rail: Curve,
    cross_section: Curve,
    pub scale: Vector3,
    /// Euler angles in degrees, applied X then Y then Z.
    pub rotation: Vector3,
    pub translation: Vector3,
    base_color: Color,
    loft: LoftOptions,
    #[serde(skip)]
    mesh: TriangleMesh,
    #[serde(skip)]
    colors: Vec<Color>,
    #[serde(skip)]
    generated: bool,
    #[serde(skip)]
    validation_message: Option<String>,
}

impl PlantPart {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_sampling(name, SamplingParams::default())
    }

    /// A part whose three curves share `params`, so equal control counts
    /// give equal sample counts.
    pub fn with_sampling(name: impl Into<String>, params: SamplingParams) -> Self {
        Self {
            name: name.into(),
            left_rail: Curve::new(params),
            right_rail: Curve::new(params),
            cross_section: Curve::new(params),
            scale: DVec3::ONE,
            rotation: DVec3::ZERO,
            translation: DVec3::ZERO,
            base_color: [0.0; 3],
            loft: LoftOptions::default(),
            mesh: TriangleMesh::default(),
            colors: Vec::new(),
            generated: false,
            validation_message: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn curve(&self, role: CurveRole) -> &Curve {
        match role {
            CurveRole::LeftRail => &self.left_rail,
            CurveRole::RightRail => &self.right_rail,
            CurveRole::CrossSection => &self.cross_section,
        }
    }

    /// Mutable access to a curve. The mesh is considered stale afterwards.
    pub fn curve_mut(&mut self, role: CurveRole) -> &mut Curve {
        self.generated = false;
        match role {
            CurveRole::LeftRail => &mut self.left_rail,
            CurveRole::RightRail => &mut self.right_rail,
            CurveRole::CrossSection => &mut self.cross_section,
        }
    }

    pub fn push_point(&mut self, role: CurveRole, position: Point3) {
        self.curve_mut(role).push(position);
    }

    pub fn translate_point(
        &mut self,
        role: CurveRole,
        index: usize,
        offset: Vector3,
    ) -> Result<()> {
        self.curve_mut(role).translate_point(index, offset)
    }

    pub fn set_weight(&mut self, role: CurveRole, index: usize, weight: f64) -> Result<()> {
        self.curve_mut(role).set_weight(index, weight)
    }

    pub fn control_points(&self, role: CurveRole) -> &[ControlPoint] {
        self.curve(role).points()
    }

    pub fn loft_options(&self) -> LoftOptions {
        self.loft
    }

    pub fn set_loft_options(&mut self, options: LoftOptions) {
        self.loft = options;
        self.generated = false;
    }

    pub fn base_color(&self) -> Color {
        self.base_color
    }

    /// Set the base colour and repaint the current vertex colours.
    pub fn set_base_color(&mut self, color: Color) {
        self.base_color = color;
        self.colors = vec![color; self.mesh.vertex_count()];
    }

    /// `T · Rx · Ry · Rz · S` from the part's translation, rotation and scale.
    pub fn part_transform(&self) -> Transform {
        Transform::from_euler_degrees(self.scale, self.rotation, self.translation)
    }

    pub fn is_generated(&self) -> bool {
        self.generated
    }

    /// Why the last regeneration produced no mesh, if it was refused.
    pub fn validation_message(&self) -> Option<&str> {
        self.validation_message.as_deref()
    }

    /// The lofted mesh, regenerated first if a curve changed since the last
    /// attempt. A refused loft leaves an empty mesh and a validation message;
    /// it is not retried until the next edit.
    pub fn mesh(&mut self) -> &TriangleMesh {
        if !self.generated {
            // The outcome is recorded in the validation message.
            let _ = self.regenerate();
        }
        &self.mesh
    }

    /// Mesh from the last regeneration, possibly stale.
    pub fn cached_mesh(&self) -> &TriangleMesh {
        &self.mesh
    }

    /// Per-vertex colours parallel to the mesh positions.
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Resample the curves and loft unconditionally. Marks the part generated
    /// whatever the outcome.
    ///
    /// # Errors
    /// `IncompatibleCurves` when the rails sample to different lengths or the
    /// cross-section has fewer than two samples. The mesh is emptied.
    pub fn regenerate(&mut self) -> Result<()> {
        let cross = self.cross_section.polyline().to_vec();
        let left = self.left_rail.polyline().to_vec();
        let right = self.right_rail.polyline().to_vec();

        self.generated = true;
        match CrossSectionLoft::new(self.loft).loft(&cross, &left, &right) {
            Ok(mesh) => {
                debug!(
                    "part '{}' regenerated: {} vertices",
                    self.name,
                    mesh.vertex_count()
                );
                self.colors = vec![self.base_color; mesh.vertex_count()];
                self.mesh = mesh;
                self.validation_message = None;
                Ok(())
            }
            Err(err) => {
                warn!("part '{}' not lofted: {}", self.name, err);
                self.mesh.clear();
                self.colors.clear();
                self.validation_message = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Drop every control point and the generated mesh.
    pub fn clear(&mut self) {
        for role in CurveRole::ALL {
            self.curve_mut(role).clear();
        }
        self.mesh.clear();
        self.colors.clear();
        self.validation_message = None;
    }
}
