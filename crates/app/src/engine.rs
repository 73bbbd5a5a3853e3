//! Reconciliation engine: owns every piece of mutable automation state and
//! runs one pass per tick.
//!
//! A pass lists the lights that are on, prunes the state tracker to them,
//! publishes the global targets, then walks the lights in listing order. For
//! each non-excluded light the color and brightness dimensions are decided
//! independently; any staged change goes out as a single combined command.
//!
//! Control commands mutate the mode flags, pins and exclusion set. Reactivating
//! a dimension triggers an immediate pass in which that dimension is reclaimed
//! from every light, including ones a user overrode. Pinning a value triggers
//! an immediate pass that applies the pin while still standing aside on
//! overridden lights.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use sunset_domain::calculator::{BrightnessCalculator, RedshiftCalculator};
use sunset_domain::command::{Command, Selector};
use sunset_domain::error::SunsetError;
use sunset_domain::exclusion::ExclusionSet;
use sunset_domain::id::LightId;
use sunset_domain::light::{Brightness, ColorTemp, LightCommand, LightObservation, same_color_temp};
use sunset_domain::mode::{ModeController, ModeFlags};
use sunset_domain::policy::{Decision, Dimension, decide};
use sunset_domain::settings::Settings;
use sunset_domain::status::{Status, TargetBrightness};
use sunset_domain::time::WallClock;
use sunset_domain::tracker::{Change, KnownState, StateTracker};

use crate::ports::{EntityGrouping, LightCommander, LightStateProvider, StatusPublisher};

/// Counters describing one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// Lights reported on by the provider.
    pub on: usize,
    /// Tracker entries dropped because their light is no longer on.
    pub pruned: usize,
    /// Lights skipped because they are excluded.
    pub excluded: usize,
    /// Lights whose observation could not be read.
    pub unreadable: usize,
    /// Commands successfully issued.
    pub commands: usize,
    /// Commands the commander rejected.
    pub failed: usize,
}

/// How a pass treats a dimension on tracked lights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Claim {
    /// Stand aside on lights changed since the last commit.
    #[default]
    Tracked,
    /// Like `Tracked`, but automate the dimension even when its flag is off.
    Forced,
    /// Claim every light, even when the dimension's flag is off.
    Reclaim,
}

impl Claim {
    fn ignores_flag(self) -> bool {
        self != Self::Tracked
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Pass {
    color: Claim,
    brightness: Claim,
}

impl Pass {
    fn claiming(dimension: Dimension, claim: Claim) -> Self {
        match dimension {
            Dimension::Color => Self {
                color: claim,
                ..Self::default()
            },
            Dimension::Brightness => Self {
                brightness: claim,
                ..Self::default()
            },
        }
    }

    fn reclaim(dimension: Dimension) -> Self {
        Self::claiming(dimension, Claim::Reclaim)
    }

    fn forced(dimension: Dimension) -> Self {
        Self::claiming(dimension, Claim::Forced)
    }
}

/// Outcome of staging one dimension of one light.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step<T> {
    /// Not automated on this light this pass.
    Skip,
    /// Automated and already at target.
    Settled,
    Apply(T),
}

/// Global targets for the current instant.
#[derive(Debug, Clone, Copy)]
struct Targets {
    color_temp: ColorTemp,
    /// `None` when brightness automation is disabled by the schedule.
    brightness: Option<Brightness>,
}

/// The reconciliation engine.
pub struct Engine<P, C, G, S> {
    provider: P,
    commander: C,
    grouping: G,
    publisher: S,
    redshift: RedshiftCalculator,
    dimmer: Option<BrightnessCalculator>,
    tracker: StateTracker,
    exclusions: ExclusionSet,
    mode: ModeController,
}

impl<P, C, G, S> Engine<P, C, G, S>
where
    P: LightStateProvider,
    C: LightCommander,
    G: EntityGrouping,
    S: StatusPublisher,
{
    /// Create an engine and publish its initial status for `now`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `settings` are inconsistent.
    pub fn new(
        settings: &Settings,
        provider: P,
        commander: C,
        grouping: G,
        publisher: S,
        now: WallClock,
    ) -> Result<Self, SunsetError> {
        settings.validate()?;
        let engine = Self {
            provider,
            commander,
            grouping,
            publisher,
            redshift: RedshiftCalculator::from_settings(settings),
            dimmer: BrightnessCalculator::from_settings(settings),
            tracker: StateTracker::new(),
            exclusions: ExclusionSet::new(),
            mode: ModeController::new(),
        };
        engine.publish_status(engine.targets(now));
        Ok(engine)
    }

    #[must_use]
    pub fn flags(&self) -> ModeFlags {
        self.mode.flags()
    }

    #[must_use]
    pub fn known_state(&self, light: &LightId) -> Option<KnownState> {
        self.tracker.get(light).copied()
    }

    #[must_use]
    pub fn is_excluded(&self, light: &LightId) -> bool {
        self.exclusions.contains(light)
    }

    /// The status the engine would publish at `now`.
    #[must_use]
    pub fn status(&self, now: WallClock) -> Status {
        self.status_for(self.targets(now))
    }

    /// Run one scheduled pass.
    ///
    /// # Errors
    ///
    /// Fails only when the on-lights cannot be listed; per-light query and
    /// command failures are logged and counted in the report.
    pub async fn tick(&mut self, now: WallClock) -> Result<TickReport, SunsetError> {
        self.reconcile(now, Pass::default()).await
    }

    /// Apply a control command.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid payload, or the error of the
    /// immediate pass or selector resolution the command triggered.
    pub async fn execute(&mut self, command: Command, now: WallClock) -> Result<(), SunsetError> {
        command.validate()?;
        info!(service = %command, "control command");

        match command {
            Command::ActivateColor => {
                self.mode.activate_color();
                self.reconcile(now, Pass::reclaim(Dimension::Color)).await?;
            }
            Command::DeactivateColor { color_temp } => {
                self.mode.deactivate_color(color_temp);
                if color_temp.is_some() {
                    self.reconcile(now, Pass::forced(Dimension::Color)).await?;
                } else {
                    self.publish_status(self.targets(now));
                }
            }
            Command::ActivateBrightness => {
                self.mode.activate_brightness();
                self.reconcile(now, Pass::reclaim(Dimension::Brightness))
                    .await?;
            }
            Command::DeactivateBrightness { brightness } => {
                self.mode.deactivate_brightness(brightness);
                if brightness.is_some() {
                    self.reconcile(now, Pass::forced(Dimension::Brightness))
                        .await?;
                } else {
                    self.publish_status(self.targets(now));
                }
            }
            Command::DontTouch(selector) => {
                for light in self.resolve(&selector).await? {
                    if self.exclusions.exclude(light.clone()) {
                        debug!(light = %light, "light excluded");
                    }
                }
            }
            Command::HandleAgain(selector) => {
                for light in self.resolve(&selector).await? {
                    if self.exclusions.release(&light) {
                        debug!(light = %light, "light handled again");
                    } else {
                        warn!(light = %light, "handle_again on a light that is not excluded");
                    }
                }
            }
        }
        Ok(())
    }

    async fn reconcile(&mut self, now: WallClock, pass: Pass) -> Result<TickReport, SunsetError> {
        let targets = self.targets(now);
        self.publish_status(targets);

        let on_lights = self.provider.list_on_lights().await?;
        let on_set: HashSet<LightId> = on_lights.iter().cloned().collect();

        let mut report = TickReport {
            on: on_set.len(),
            pruned: self.tracker.retain_on(&on_set),
            ..TickReport::default()
        };

        let mut seen = HashSet::with_capacity(on_set.len());
        for light in on_lights {
            if !seen.insert(light.clone()) {
                continue;
            }
            if self.exclusions.contains(&light) {
                report.excluded += 1;
                continue;
            }

            let observation = match self.provider.get(&light).await {
                Ok(Some(observation)) if observation.on => observation,
                Ok(_) => {
                    debug!(light = %light, "light no longer on; skipped");
                    if self.tracker.forget(&light) {
                        report.pruned += 1;
                    }
                    continue;
                }
                Err(err) => {
                    warn!(light = %light, error = %err, "failed to read light state");
                    report.unreadable += 1;
                    continue;
                }
            };

            self.reconcile_light(&light, &observation, targets, pass, &mut report)
                .await;
        }

        debug!(
            on = report.on,
            pruned = report.pruned,
            excluded = report.excluded,
            commands = report.commands,
            failed = report.failed,
            "pass complete"
        );
        Ok(report)
    }

    async fn reconcile_light(
        &mut self,
        light: &LightId,
        observation: &LightObservation,
        targets: Targets,
        pass: Pass,
        report: &mut TickReport,
    ) {
        let known = self.tracker.get(light).copied();
        let color = self.stage_color(light, observation, known.as_ref(), targets, pass);
        let brightness = self.stage_brightness(light, observation, known.as_ref(), targets, pass);

        let mut change = Change::default();
        // Reclaimed dimensions already at target are re-verified so later
        // passes compare against the live value.
        let mut adopted = Change::default();
        match color {
            Step::Apply(color_temp) => change.color_temp = Some(color_temp),
            Step::Settled if pass.color == Claim::Reclaim => {
                adopted.color_temp = observation.color_temp;
            }
            Step::Settled | Step::Skip => {}
        }
        match brightness {
            Step::Apply(level) => change.brightness = Some(level),
            Step::Settled if pass.brightness == Claim::Reclaim => {
                adopted.brightness = observation.brightness;
            }
            Step::Settled | Step::Skip => {}
        }

        if change.is_empty() {
            self.tracker.seed(light, observation);
        } else {
            let command = LightCommand {
                light_id: light.clone(),
                color_temp: change.color_temp.or(observation.color_temp),
                brightness: change.brightness.or(observation.brightness),
            };
            debug!(
                light = %light,
                color_temp = ?change.color_temp.map(ColorTemp::kelvin),
                brightness = ?change.brightness,
                "applying light command"
            );
            match self.commander.set_light(&command).await {
                Ok(()) => {
                    self.tracker.commit(light, observation, change);
                    report.commands += 1;
                }
                Err(err) => {
                    warn!(light = %light, error = %err, "light command failed");
                    report.failed += 1;
                }
            }
        }

        if !adopted.is_empty() {
            self.tracker.commit(light, observation, adopted);
        }
    }

    fn stage_color(
        &self,
        light: &LightId,
        observation: &LightObservation,
        known: Option<&KnownState>,
        targets: Targets,
        pass: Pass,
    ) -> Step<ColorTemp> {
        let reclaim = pass.color == Claim::Reclaim;
        if !self.mode.flags().color_active && !pass.color.ignores_flag() {
            return Step::Skip;
        }
        match decide(Dimension::Color, observation, known, reclaim) {
            Decision::Unsupported => Step::Skip,
            Decision::Overridden => {
                debug!(light = %light, dimension = %Dimension::Color, "overridden; standing aside");
                Step::Skip
            }
            Decision::Compute => {
                let target = targets
                    .color_temp
                    .clamp_to(observation.min_color_temp, observation.max_color_temp);
                if same_color_temp(Some(target), observation.color_temp) {
                    Step::Settled
                } else {
                    Step::Apply(target)
                }
            }
        }
    }

    fn stage_brightness(
        &self,
        light: &LightId,
        observation: &LightObservation,
        known: Option<&KnownState>,
        targets: Targets,
        pass: Pass,
    ) -> Step<Brightness> {
        let Some(target) = targets.brightness else {
            return Step::Skip;
        };
        let reclaim = pass.brightness == Claim::Reclaim;
        if !self.mode.flags().brightness_active && !pass.brightness.ignores_flag() {
            return Step::Skip;
        }
        match decide(Dimension::Brightness, observation, known, reclaim) {
            Decision::Unsupported => Step::Skip,
            Decision::Overridden => {
                debug!(light = %light, dimension = %Dimension::Brightness, "overridden; standing aside");
                Step::Skip
            }
            Decision::Compute if observation.brightness == Some(target) => Step::Settled,
            Decision::Compute => Step::Apply(target),
        }
    }

    fn targets(&self, now: WallClock) -> Targets {
        let manual = self.mode.manual();
        Targets {
            color_temp: manual
                .color_temp
                .unwrap_or_else(|| self.redshift.color_temp(now)),
            brightness: self
                .dimmer
                .map(|dimmer| manual.brightness.unwrap_or_else(|| dimmer.brightness(now))),
        }
    }

    fn status_for(&self, targets: Targets) -> Status {
        let flags = self.mode.flags();
        Status {
            color_active: flags.color_active,
            brightness_active: flags.brightness_active,
            color_temp: targets.color_temp,
            brightness: targets
                .brightness
                .map_or(TargetBrightness::Disabled, TargetBrightness::Level),
        }
    }

    fn publish_status(&self, targets: Targets) {
        if let Err(err) = self.publisher.publish(self.status_for(targets)) {
            warn!(error = %err, "failed to publish status");
        }
    }

    /// Device members, then area members, then explicit ids; duplicates
    /// dropped.
    async fn resolve(&self, selector: &Selector) -> Result<Vec<LightId>, SunsetError> {
        let mut lights = Vec::new();
        if let Some(device) = &selector.device_id {
            lights.extend(self.grouping.entities_for_device(device).await?);
        }
        if let Some(area) = &selector.area_id {
            lights.extend(self.grouping.entities_for_area(area).await?);
        }
        lights.extend(selector.entity_ids.iter().cloned());

        let mut seen = HashSet::with_capacity(lights.len());
        lights.retain(|light| seen.insert(light.clone()));
        Ok(lights)
    }
}
