// Watch variables: named debug sliders the host can tweak between frames

use crate::core::math::{clamp, snap};

/// Handle to a registered slider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatchId(usize);

/// A named numeric value with a range and step
#[derive(Debug, Clone, PartialEq)]
pub struct Slider {
    pub title: String,
    pub group: String,
    pub value: f32,
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl Slider {
    /// Clamp into range and snap onto the step grid
    fn constrain(&self, value: f32) -> f32 {
        let snapped = snap(value, self.min, self.step);
        clamp(snapped, self.min, self.max)
    }
}

/// Registry of all sliders, with one of them selected for keyboard tweaking
#[derive(Debug, Default)]
pub struct WatchRegistry {
    sliders: Vec<Slider>,
    selected: Option<usize>,
}

impl WatchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a slider; the first one registered becomes selected
    pub fn add_slider(
        &mut self,
        title: &str,
        group: &str,
        initial: f32,
        min: f32,
        max: f32,
        step: f32,
    ) -> WatchId {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let slider = Slider {
            title: title.to_string(),
            group: group.to_string(),
            value: clamp(initial, min, max),
            min,
            max,
            step,
        };
        log::debug!("Watch '{}' added to group '{}'", slider.title, slider.group);

        self.sliders.push(slider);
        let index = self.sliders.len() - 1;
        self.selected.get_or_insert(index);
        WatchId(index)
    }

    pub fn get(&self, id: WatchId) -> Option<&Slider> {
        self.sliders.get(id.0)
    }

    /// Current value, or 0 for an unknown id
    pub fn value(&self, id: WatchId) -> f32 {
        self.get(id).map_or(0.0, |slider| slider.value)
    }

    /// Set a value, clamped and snapped; returns the stored value
    pub fn set(&mut self, id: WatchId, value: f32) -> Option<f32> {
        let slider = self.sliders.get_mut(id.0)?;
        let value = slider.constrain(value);
        if value != slider.value {
            log::info!("{} = {:.4}", slider.title, value);
            slider.value = value;
        }
        Some(value)
    }

    /// Move a value by a whole number of steps
    pub fn nudge(&mut self, id: WatchId, steps: i32) -> Option<f32> {
        let slider = self.get(id)?;
        let value = slider.value + slider.step * steps as f32;
        self.set(id, value)
    }

    /// Currently selected slider
    pub fn selected(&self) -> Option<WatchId> {
        self.selected.map(WatchId)
    }

    /// Select the next slider, wrapping around
    pub fn select_next(&mut self) -> Option<WatchId> {
        if self.sliders.is_empty() {
            return None;
        }
        let next = self.selected.map_or(0, |i| (i + 1) % self.sliders.len());
        self.selected = Some(next);
        log::debug!("Selected watch '{}'", self.sliders[next].title);
        Some(WatchId(next))
    }

    /// Nudge the selected slider
    pub fn nudge_selected(&mut self, steps: i32) -> Option<f32> {
        let id = self.selected()?;
        self.nudge(id, steps)
    }

    /// Short description of the selected slider, e.g. for a title bar
    pub fn describe_selected(&self) -> Option<String> {
        let slider = self.get(self.selected()?)?;
        Some(format!(
            "{}/{}: {:.3}",
            slider.group, slider.title, slider.value
        ))
    }
}
