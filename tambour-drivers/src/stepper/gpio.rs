//! Step/direction GPIO actuator
//!
//! Drives A4988 / TMC2209-style step-dir inputs directly from GPIO. Pulse
//! width is not handled here: the caller holds the pulse between
//! [`StepActuator::step`] and [`StepActuator::unstep`].

use tambour_hal::{Axis, AxisMask, OutputPin, StepActuator};

/// Step and direction lines for one axis
pub struct AxisLines<P> {
    step: P,
    dir: P,
    step_inverted: bool,
    dir_inverted: bool,
}

impl<P: OutputPin> AxisLines<P> {
    /// Wrap a step/dir pin pair. Lines start deasserted.
    pub fn new(mut step: P, mut dir: P, step_inverted: bool, dir_inverted: bool) -> Self {
        step.set_state(step_inverted);
        dir.set_state(dir_inverted);
        Self {
            step,
            dir,
            step_inverted,
            dir_inverted,
        }
    }

    fn set_step(&mut self, active: bool) {
        self.step.set_state(active != self.step_inverted);
    }

    fn set_dir(&mut self, negative: bool) {
        self.dir.set_state(negative != self.dir_inverted);
    }
}

/// Two-axis (X/Y) step actuator on plain GPIO
///
/// Direction lines are always written before step lines are asserted, so
/// drivers see a stable direction on the step edge.
pub struct GpioStepActuator<P> {
    x: AxisLines<P>,
    y: AxisLines<P>,
}

impl<P: OutputPin> GpioStepActuator<P> {
    /// Create an actuator from the X and Y line pairs
    pub fn new(x: AxisLines<P>, y: AxisLines<P>) -> Self {
        Self { x, y }
    }

    fn axes(&mut self) -> [(Axis, &mut AxisLines<P>); 2] {
        [(Axis::X, &mut self.x), (Axis::Y, &mut self.y)]
    }
}

impl<P: OutputPin> StepActuator for GpioStepActuator<P> {
    fn step(&mut self, step_mask: AxisMask, dir_mask: AxisMask) {
        for (axis, lines) in self.axes() {
            lines.set_dir(dir_mask.contains(axis));
        }
        for (axis, lines) in self.axes() {
            if step_mask.contains(axis) {
                lines.set_step(true);
            }
        }
    }

    fn unstep(&mut self) {
        for (_, lines) in self.axes() {
            lines.set_step(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Trace = Rc<RefCell<Vec<(&'static str, bool)>>>;

    // Mock pin that logs every write into a shared trace
    struct MockPin {
        name: &'static str,
        high: bool,
        trace: Trace,
    }

    impl MockPin {
        fn new(name: &'static str, trace: &Trace) -> Self {
            Self {
                name,
                high: false,
                trace: trace.clone(),
            }
        }
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high = true;
            self.trace.borrow_mut().push((self.name, true));
        }

        fn set_low(&mut self) {
            self.high = false;
            self.trace.borrow_mut().push((self.name, false));
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    fn actuator(trace: &Trace, x_step_inverted: bool, y_dir_inverted: bool) -> GpioStepActuator<MockPin> {
        let x = AxisLines::new(
            MockPin::new("x_step", trace),
            MockPin::new("x_dir", trace),
            x_step_inverted,
            false,
        );
        let y = AxisLines::new(
            MockPin::new("y_step", trace),
            MockPin::new("y_dir", trace),
            false,
            y_dir_inverted,
        );
        trace.borrow_mut().clear();
        GpioStepActuator::new(x, y)
    }

    fn level(act: &GpioStepActuator<MockPin>, name: &str) -> bool {
        let lines = [&act.x.step, &act.x.dir, &act.y.step, &act.y.dir];
        lines
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.is_set_high())
            .unwrap()
    }

    #[test]
    fn test_direction_before_step() {
        let trace = Trace::default();
        let mut act = actuator(&trace, false, false);

        act.step(AxisMask::EMPTY.with(Axis::X), AxisMask::EMPTY.with(Axis::X));

        assert_eq!(
            *trace.borrow(),
            vec![("x_dir", true), ("y_dir", false), ("x_step", true)]
        );
    }

    #[test]
    fn test_step_and_unstep_levels() {
        let trace = Trace::default();
        let mut act = actuator(&trace, false, false);

        let both = AxisMask::EMPTY.with(Axis::X).with(Axis::Y);
        act.step(both, AxisMask::EMPTY.with(Axis::Y));
        assert!(level(&act, "x_step"));
        assert!(level(&act, "y_step"));
        assert!(!level(&act, "x_dir"));
        assert!(level(&act, "y_dir"));

        act.unstep();
        assert!(!level(&act, "x_step"));
        assert!(!level(&act, "y_step"));
        // Direction is held across unstep
        assert!(level(&act, "y_dir"));
    }

    #[test]
    fn test_inverted_lines() {
        let trace = Trace::default();
        let mut act = actuator(&trace, true, true);

        // Idle level of an inverted step line is high
        assert!(level(&act, "x_step"));

        act.step(AxisMask::EMPTY.with(Axis::X), AxisMask::EMPTY);
        assert!(!level(&act, "x_step"));
        assert!(level(&act, "y_dir"));

        act.unstep();
        assert!(level(&act, "x_step"));
    }

    #[test]
    fn test_unmasked_axis_does_not_pulse() {
        let trace = Trace::default();
        let mut act = actuator(&trace, false, false);

        act.step(AxisMask::EMPTY.with(Axis::Y), AxisMask::EMPTY);
        assert!(!trace.borrow().iter().any(|&(name, high)| name == "x_step" && high));
    }
}
