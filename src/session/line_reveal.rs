use crate::animation::scheduler::{AnimationScheduler, SchedulerState, StepOutcome, StopHandle};
use crate::config::model::RevealConfig;
use crate::foundation::error::RevealResult;
use crate::host::{FrameTick, Host};
use crate::lifecycle::disposal::{DisposalManager, Teardown};
use crate::lifecycle::resize::{ResizeHandler, ResizeOutcome};
use crate::lifecycle::visibility::VisibilityTrigger;
use crate::scene::manager::SceneManager;

/// One mounted line-drawing effect bound to its host container.
///
/// The embedder forwards host events to [`LineReveal::on_intersection`],
/// [`LineReveal::on_frame`], [`LineReveal::on_resize`] and [`LineReveal::dispose`]. None of them
/// return errors: failures are logged and the effect degrades to showing nothing.
///
/// Dropping the value disposes it.
pub struct LineReveal<H: Host> {
    host: H,
    config: RevealConfig,
    visibility: VisibilityTrigger,
    scheduler: AnimationScheduler,
    resize: ResizeHandler,
    scene: Option<SceneManager>,
    disposal: DisposalManager,
    stop: Option<StopHandle>,
}

impl<H: Host> LineReveal<H> {
    /// Mount with a validated configuration.
    ///
    /// An invalid configuration is the only error; a missing container yields an inert mount.
    pub fn try_mount(host: H, config: RevealConfig) -> RevealResult<Self> {
        config.validate()?;
        Ok(Self::mount_unchecked(host, config))
    }

    /// Mount, degrading to an inert effect if the configuration is invalid.
    pub fn mount(host: H, config: RevealConfig) -> Self {
        match config.validate() {
            Ok(()) => Self::mount_unchecked(host, config),
            Err(e) => {
                tracing::warn!(error = %e, "invalid reveal config; effect disabled");
                Self::inert(host, config)
            }
        }
    }

    fn mount_unchecked(mut host: H, config: RevealConfig) -> Self {
        if host.container_size().is_none() {
            tracing::debug!("no container at mount; effect disabled");
            return Self::inert(host, config);
        }
        let mut this = Self::inert(host, config);
        this.visibility.observe(&mut this.host);
        this.resize.listen(&mut this.host);
        tracing::debug!("reveal mounted");
        this
    }

    fn inert(host: H, config: RevealConfig) -> Self {
        Self {
            visibility: VisibilityTrigger::new(config.visibility_threshold),
            scheduler: AnimationScheduler::new(config.frame_step),
            resize: ResizeHandler::new(),
            scene: None,
            disposal: DisposalManager::new(),
            stop: None,
            host,
            config,
        }
    }

    /// Intersection report from the host's visibility observer.
    pub fn on_intersection(&mut self, visible_ratio: f64) {
        if self.disposal.is_disposed() {
            return;
        }
        if self.visibility.on_intersection(visible_ratio) {
            tracing::debug!(visible_ratio, "container visible; initializing");
            self.initialize();
        }
    }

    fn initialize(&mut self) {
        let Some(size) = self.host.container_size() else {
            tracing::debug!("container vanished before initialization");
            return;
        };
        match SceneManager::initialize(size, &self.config.lines, &self.config, &mut self.host) {
            Ok(scene) => {
                self.scene = Some(scene);
                self.stop = Some(self.scheduler.start(&mut self.host));
            }
            Err(e) => {
                tracing::warn!(error = %e, "reveal surface unavailable; effect not shown");
            }
        }
    }

    /// Animation frame callback.
    pub fn on_frame(&mut self, tick: FrameTick) -> StepOutcome {
        if self.disposal.is_disposed() {
            return StepOutcome::Ignored;
        }
        let Some(scene) = self.scene.as_mut() else {
            return StepOutcome::Ignored;
        };
        self.scheduler.on_frame(tick, scene, &mut self.host)
    }

    /// Resize notification. A finished scene is repainted at the new size.
    pub fn on_resize(&mut self) {
        if self.disposal.is_disposed() {
            return;
        }
        match self.resize.handle(self.scene.as_mut(), &mut self.host) {
            Ok(ResizeOutcome::Updated(_)) => {
                if self.scheduler.state() == SchedulerState::Done
                    && let Some(scene) = self.scene.as_mut()
                {
                    scene.repaint(&mut self.host);
                }
            }
            Ok(ResizeOutcome::Skipped) => {}
            Err(e) => tracing::warn!(error = %e, "reveal resize failed"),
        }
    }

    /// Release every host resource. Safe from any state and on repeated calls.
    pub fn dispose(&mut self) {
        self.disposal.dispose(
            Teardown {
                visibility: &mut self.visibility,
                scheduler: &mut self.scheduler,
                resize: &mut self.resize,
                scene: self.scene.as_mut(),
            },
            &mut self.host,
        );
        self.scene = None;
    }

    /// Borrow the host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutably borrow the host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Effective configuration.
    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    /// The scene, once initialized and until disposed.
    pub fn scene(&self) -> Option<&SceneManager> {
        self.scene.as_ref()
    }

    /// Frame loop state.
    pub fn scheduler_state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    /// Stop handle produced when the loop started.
    pub fn stop_handle(&self) -> Option<&StopHandle> {
        self.stop.as_ref()
    }

    /// `true` once the visibility trigger has fired.
    pub fn is_triggered(&self) -> bool {
        self.visibility.has_fired()
    }

    /// `true` after [`LineReveal::dispose`] (or drop).
    pub fn is_disposed(&self) -> bool {
        self.disposal.is_disposed()
    }
}

impl<H: Host> Drop for LineReveal<H> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<H: Host> std::fmt::Debug for LineReveal<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineReveal")
            .field("triggered", &self.visibility.has_fired())
            .field("scheduler", &self.scheduler.state())
            .field("initialized", &self.scene.is_some())
            .field("disposed", &self.disposal.is_disposed())
            .finish()
    }
}
