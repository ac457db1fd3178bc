//! Per-view state and render scheduling
//!
//! A session owns one [`Adjustments`] record and one source buffer per eye
//! side. UI call sites never mutate that state directly; they submit
//! [`AdjustmentCommand`] messages, which coalesce with last-write-wins
//! semantics behind a quiet-period deadline so a slider drag does not
//! trigger a full-buffer recompute per tick.
//!
//! Renders carry a generation number. Only the result of the most recently
//! started render may be committed to the display buffer; anything older is
//! discarded, so late results can never overwrite newer ones regardless of
//! completion order.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::auto_levels::{self, AutoLevelsStrategy};
use crate::buffer::PixelBuffer;
use crate::tone::{apply_adjustments, AdjustmentField, Adjustments};

/// Which eye an image view belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EyeSide {
    Left,
    Right,
}

impl EyeSide {
    pub const BOTH: [EyeSide; 2] = [EyeSide::Left, EyeSide::Right];
}

/// One adjustment change addressed to a specific eye view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjustmentCommand {
    pub eye: EyeSide,
    pub field: AdjustmentField,
    pub value: f32,
}

/// State owned by a single eye view; never shared across sides
#[derive(Debug, Default)]
struct EyeView {
    adjustments: Adjustments,
    source: Option<PixelBuffer>,
    display: Option<PixelBuffer>,
    /// Generation of the most recently started render
    render_generation: u64,
    /// Deadline after which a pending re-render is due
    render_deadline: Option<Instant>,
}

/// Owner of both eye views and their render scheduling
#[derive(Debug)]
pub struct Session {
    left: EyeView,
    right: EyeView,
    active: EyeSide,
    dual_view: bool,
    debounce: Duration,
}

impl Session {
    /// `debounce` is the quiet period between the last adjustment command
    /// and the render it schedules
    pub fn new(debounce: Duration) -> Self {
        Self {
            left: EyeView::default(),
            right: EyeView::default(),
            active: EyeSide::Left,
            dual_view: false,
            debounce,
        }
    }

    fn view(&self, eye: EyeSide) -> &EyeView {
        match eye {
            EyeSide::Left => &self.left,
            EyeSide::Right => &self.right,
        }
    }

    fn view_mut(&mut self, eye: EyeSide) -> &mut EyeView {
        match eye {
            EyeSide::Left => &mut self.left,
            EyeSide::Right => &mut self.right,
        }
    }

    pub fn set_active(&mut self, eye: EyeSide) {
        self.active = eye;
    }

    pub fn active(&self) -> EyeSide {
        self.active
    }

    pub fn set_dual_view(&mut self, dual: bool) {
        self.dual_view = dual;
    }

    /// Eyes affected by view-wide operations: both in dual-view mode,
    /// otherwise just the active side
    pub fn targets(&self) -> &'static [EyeSide] {
        const LEFT_ONLY: [EyeSide; 1] = [EyeSide::Left];
        const RIGHT_ONLY: [EyeSide; 1] = [EyeSide::Right];

        if self.dual_view {
            &EyeSide::BOTH
        } else {
            match self.active {
                EyeSide::Left => &LEFT_ONLY,
                EyeSide::Right => &RIGHT_ONLY,
            }
        }
    }

    /// Install a new source image; adjustments reset on load
    pub fn load_image(&mut self, eye: EyeSide, buffer: PixelBuffer) {
        let view = self.view_mut(eye);
        view.source = Some(buffer);
        view.display = None;
        view.adjustments.reset();
        view.render_deadline = None;
    }

    pub fn adjustments(&self, eye: EyeSide) -> &Adjustments {
        &self.view(eye).adjustments
    }

    /// Most recently committed display buffer, if any render has finished
    pub fn display(&self, eye: EyeSide) -> Option<&PixelBuffer> {
        self.view(eye).display.as_ref()
    }

    /// The buffer the analysis and auto-levels steps should read: the
    /// rendered display when present, otherwise the raw source
    pub fn analysis_buffer(&self, eye: EyeSide) -> Option<&PixelBuffer> {
        let view = self.view(eye);
        view.display.as_ref().or(view.source.as_ref())
    }

    /// Apply one command with last-write-wins semantics and push the
    /// render deadline out by the debounce window
    pub fn apply_command(&mut self, command: AdjustmentCommand, now: Instant) {
        let debounce = self.debounce;
        let view = self.view_mut(command.eye);
        view.adjustments.set(command.field, command.value);
        view.render_deadline = Some(now + debounce);
    }

    /// Zero the adjustments for one eye and schedule a re-render
    pub fn reset_adjustments(&mut self, eye: EyeSide, now: Instant) {
        let debounce = self.debounce;
        let view = self.view_mut(eye);
        view.adjustments.reset();
        view.render_deadline = Some(now + debounce);
    }

    /// True once the quiet period after the last command has elapsed
    pub fn render_due(&self, eye: EyeSide, now: Instant) -> bool {
        matches!(self.view(eye).render_deadline, Some(deadline) if now >= deadline)
    }

    /// Snapshot the inputs for a render and claim the next generation
    ///
    /// Clears the pending deadline; a command arriving afterwards starts a
    /// new cycle with a higher generation.
    pub fn begin_render(&mut self, eye: EyeSide) -> Result<(PixelBuffer, Adjustments, u64), String> {
        let view = self.view_mut(eye);
        let source = view
            .source
            .as_ref()
            .ok_or_else(|| format!("no image loaded for {:?} eye", eye))?
            .clone();
        view.render_generation += 1;
        view.render_deadline = None;
        Ok((source, view.adjustments, view.render_generation))
    }

    /// Commit a finished render; stale generations are discarded
    ///
    /// Returns whether the result was accepted as the display buffer.
    pub fn commit_render(&mut self, eye: EyeSide, generation: u64, buffer: PixelBuffer) -> bool {
        let view = self.view_mut(eye);
        if generation != view.render_generation {
            return false;
        }
        view.display = Some(buffer);
        true
    }

    /// Render one eye synchronously: snapshot, tone pipeline, commit
    pub fn render_now(&mut self, eye: EyeSide) -> Result<(), String> {
        let (source, adjustments, generation) = self.begin_render(eye)?;
        let rendered = apply_adjustments(&source, &adjustments)?;
        self.commit_render(eye, generation, rendered);
        Ok(())
    }

    /// Run auto-levels over every targeted eye that has an image loaded,
    /// rewriting its adjustments and scheduling a re-render
    pub fn auto_levels(
        &mut self,
        strategy: AutoLevelsStrategy,
        now: Instant,
    ) -> Result<(), String> {
        let debounce = self.debounce;
        for &eye in self.targets() {
            let view = self.view_mut(eye);
            let buffer = match view.display.as_ref().or(view.source.as_ref()) {
                Some(buffer) => buffer,
                None => continue,
            };
            auto_levels::auto_levels(buffer, strategy, &mut view.adjustments)?;
            view.render_deadline = Some(now + debounce);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Rgba;

    fn session() -> Session {
        Session::new(Duration::from_millis(100))
    }

    #[test]
    fn test_commands_coalesce_last_write_wins() {
        let mut s = session();
        let t0 = Instant::now();

        for value in [10.0, 35.0, -5.0, 60.0] {
            s.apply_command(
                AdjustmentCommand {
                    eye: EyeSide::Left,
                    field: AdjustmentField::Exposure,
                    value,
                },
                t0,
            );
        }

        assert_eq!(s.adjustments(EyeSide::Left).exposure, 60.0);
    }

    #[test]
    fn test_render_due_after_quiet_period() {
        let mut s = session();
        let t0 = Instant::now();

        s.apply_command(
            AdjustmentCommand {
                eye: EyeSide::Left,
                field: AdjustmentField::Contrast,
                value: 20.0,
            },
            t0,
        );

        assert!(!s.render_due(EyeSide::Left, t0));
        assert!(!s.render_due(EyeSide::Left, t0 + Duration::from_millis(50)));
        assert!(s.render_due(EyeSide::Left, t0 + Duration::from_millis(100)));

        // A later command pushes the deadline out again
        s.apply_command(
            AdjustmentCommand {
                eye: EyeSide::Left,
                field: AdjustmentField::Contrast,
                value: 25.0,
            },
            t0 + Duration::from_millis(80),
        );
        assert!(!s.render_due(EyeSide::Left, t0 + Duration::from_millis(100)));
        assert!(s.render_due(EyeSide::Left, t0 + Duration::from_millis(180)));
    }

    #[test]
    fn test_stale_render_is_discarded() {
        let mut s = session();
        s.load_image(EyeSide::Left, PixelBuffer::solid(2, 2, Rgba::gray(100)));

        let (source_a, adj_a, gen_a) = s.begin_render(EyeSide::Left).unwrap();
        // A newer render starts before the first completes
        let (_, _, gen_b) = s.begin_render(EyeSide::Left).unwrap();
        assert!(gen_b > gen_a);

        let stale = apply_adjustments(&source_a, &adj_a).unwrap();
        assert!(!s.commit_render(EyeSide::Left, gen_a, stale));
        assert!(s.display(EyeSide::Left).is_none());

        let fresh = PixelBuffer::solid(2, 2, Rgba::gray(200));
        assert!(s.commit_render(EyeSide::Left, gen_b, fresh));
        assert!(s.display(EyeSide::Left).is_some());
    }

    #[test]
    fn test_eyes_are_isolated() {
        let mut s = session();
        let t0 = Instant::now();
        s.load_image(EyeSide::Left, PixelBuffer::solid(1, 1, Rgba::gray(10)));
        s.load_image(EyeSide::Right, PixelBuffer::solid(1, 1, Rgba::gray(240)));

        s.apply_command(
            AdjustmentCommand {
                eye: EyeSide::Left,
                field: AdjustmentField::Saturation,
                value: 44.0,
            },
            t0,
        );

        assert_eq!(s.adjustments(EyeSide::Left).saturation, 44.0);
        assert_eq!(s.adjustments(EyeSide::Right).saturation, 0.0);
        assert!(!s.render_due(EyeSide::Right, t0 + Duration::from_secs(1)));
    }

    #[test]
    fn test_load_image_resets_adjustments() {
        let mut s = session();
        let t0 = Instant::now();
        s.apply_command(
            AdjustmentCommand {
                eye: EyeSide::Left,
                field: AdjustmentField::Hue,
                value: 30.0,
            },
            t0,
        );

        s.load_image(EyeSide::Left, PixelBuffer::solid(1, 1, Rgba::gray(0)));
        assert!(s.adjustments(EyeSide::Left).is_identity());
    }

    #[test]
    fn test_targets_follow_view_mode() {
        let mut s = session();
        assert_eq!(s.targets(), &[EyeSide::Left]);

        s.set_active(EyeSide::Right);
        assert_eq!(s.targets(), &[EyeSide::Right]);

        s.set_dual_view(true);
        assert_eq!(s.targets(), &EyeSide::BOTH);
    }

    #[test]
    fn test_render_now_produces_display() {
        let mut s = session();
        let t0 = Instant::now();
        s.load_image(EyeSide::Left, PixelBuffer::solid(2, 2, Rgba::gray(100)));
        s.apply_command(
            AdjustmentCommand {
                eye: EyeSide::Left,
                field: AdjustmentField::Exposure,
                value: 100.0,
            },
            t0,
        );

        s.render_now(EyeSide::Left).unwrap();
        let display = s.display(EyeSide::Left).unwrap();
        assert_eq!(display.get(0, 0).unwrap().r, 200);
    }

    #[test]
    fn test_render_without_image_is_error() {
        let mut s = session();
        assert!(s.render_now(EyeSide::Left).is_err());
    }

    #[test]
    fn test_auto_levels_targets_active_eye() {
        let mut s = session();
        let t0 = Instant::now();
        s.load_image(EyeSide::Left, PixelBuffer::solid(4, 4, Rgba::gray(40)));
        s.load_image(EyeSide::Right, PixelBuffer::solid(4, 4, Rgba::gray(40)));

        s.auto_levels(AutoLevelsStrategy::BrightnessBanded, t0).unwrap();

        // Dark image lifts exposure on the active (left) eye only
        assert!(s.adjustments(EyeSide::Left).exposure > 0.0);
        assert_eq!(s.adjustments(EyeSide::Right).exposure, 0.0);
        assert!(s.render_due(EyeSide::Left, t0 + Duration::from_millis(100)));
    }
}
