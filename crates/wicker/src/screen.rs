//! Screen lifecycle scaffolding.
//!
//! A screen is a hosted surface with a required ordered-initialization
//! protocol gated by a validation step: arguments are validated first, then
//! widgets are built, then data is loaded — each stage only if the prior
//! one succeeded, and a failed validation terminates the screen
//! immediately. The protocol is an explicit state machine driven by a
//! configuration of optional hook closures; there is no base class to
//! subclass and no virtual dispatch.
//!
//! Screens nest: a hosting screen offers the back-navigation signal to its
//! children (in order) before handling it itself, and terminates when
//! nobody consumes it.
//!
//! # Example
//!
//! ```
//! use wicker::screen::{Screen, ScreenHooks, ScreenStage};
//!
//! struct Args { user_id: u64 }
//!
//! let mut screen = Screen::new(
//!     ScreenHooks::new()
//!         .init_args(|args: &Args| args.user_id != 0)
//!         .init_widget(|| { /* build widgets */ })
//!         .init_data(|| { /* kick off loading */ }),
//! );
//!
//! screen.launch(&Args { user_id: 7 });
//! assert_eq!(screen.stage(), ScreenStage::DataLoaded);
//! ```

use wicker_core::logging::targets;

/// The stages of a screen's initialization protocol.
///
/// Stages advance strictly in declaration order; `Terminated` is reachable
/// from any stage and is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenStage {
    /// Constructed, not yet launched.
    Created,
    /// Arguments were validated successfully.
    ArgsValidated,
    /// Widgets are built and ready.
    WidgetsReady,
    /// Initial data loading has been kicked off.
    DataLoaded,
    /// The screen is finished; no further stage transitions.
    Terminated,
}

/// Configuration of a screen's lifecycle hooks.
///
/// Every hook is optional. A missing `init_args` accepts any arguments; a
/// missing `on_back` declines the back signal.
pub struct ScreenHooks<A> {
    init_args: Option<Box<dyn Fn(&A) -> bool + Send + Sync>>,
    init_widget: Option<Box<dyn Fn() + Send + Sync>>,
    init_data: Option<Box<dyn Fn() + Send + Sync>>,
    on_back: Option<Box<dyn Fn() -> bool + Send + Sync>>,
}

impl<A> Default for ScreenHooks<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> ScreenHooks<A> {
    /// Creates an empty hook set (accept args, no-op stages, decline back).
    pub fn new() -> Self {
        Self {
            init_args: None,
            init_widget: None,
            init_data: None,
            on_back: None,
        }
    }

    /// Sets the argument-validation hook. Returning `false` terminates the
    /// screen before any widgets are built.
    pub fn init_args<F>(mut self, f: F) -> Self
    where
        F: Fn(&A) -> bool + Send + Sync + 'static,
    {
        self.init_args = Some(Box::new(f));
        self
    }

    /// Sets the widget-construction hook.
    pub fn init_widget<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.init_widget = Some(Box::new(f));
        self
    }

    /// Sets the data-loading hook.
    pub fn init_data<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.init_data = Some(Box::new(f));
        self
    }

    /// Sets the back-signal hook. Returning `true` consumes the signal.
    pub fn on_back<F>(mut self, f: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.on_back = Some(Box::new(f));
        self
    }
}

/// A screen: lifecycle stage, hooks, and nested child screens.
pub struct Screen<A> {
    stage: ScreenStage,
    hooks: ScreenHooks<A>,
    children: Vec<Screen<A>>,
}

impl<A> Screen<A> {
    /// Creates a screen in the `Created` stage.
    pub fn new(hooks: ScreenHooks<A>) -> Self {
        Self {
            stage: ScreenStage::Created,
            hooks,
            children: Vec::new(),
        }
    }

    /// The screen's current stage.
    pub fn stage(&self) -> ScreenStage {
        self.stage
    }

    /// Attaches a nested child screen.
    ///
    /// Children are offered the back signal in attachment order, before
    /// the hosting screen itself.
    pub fn add_child(&mut self, child: Screen<A>) {
        self.children.push(child);
    }

    /// The nested child screens.
    pub fn children(&self) -> &[Screen<A>] {
        &self.children
    }

    /// Drives the initialization protocol to completion.
    ///
    /// Runs `init_args`; on success runs `init_widget` then `init_data`
    /// and lands in `DataLoaded`. On validation failure the screen moves
    /// straight to `Terminated` and no later hook runs. Launching a screen
    /// past `Created` changes nothing and returns the current stage.
    pub fn launch(&mut self, args: &A) -> ScreenStage {
        if self.stage != ScreenStage::Created {
            return self.stage;
        }

        let accepted = self.hooks.init_args.as_ref().is_none_or(|f| f(args));
        if !accepted {
            tracing::debug!(target: targets::SCREEN, "argument validation failed, terminating");
            self.stage = ScreenStage::Terminated;
            return self.stage;
        }
        self.stage = ScreenStage::ArgsValidated;

        if let Some(f) = &self.hooks.init_widget {
            f();
        }
        self.stage = ScreenStage::WidgetsReady;

        if let Some(f) = &self.hooks.init_data {
            f();
        }
        self.stage = ScreenStage::DataLoaded;
        tracing::debug!(target: targets::SCREEN, "screen launched");
        self.stage
    }

    /// Finishes the screen.
    pub fn terminate(&mut self) {
        self.stage = ScreenStage::Terminated;
    }

    /// Offers the back signal to children (in order), then to this
    /// screen's own `on_back` hook.
    ///
    /// Returns `true` if anyone consumed it. Terminated screens never
    /// consume the signal.
    pub fn dispatch_back(&mut self) -> bool {
        if self.stage == ScreenStage::Terminated {
            return false;
        }
        for child in &mut self.children {
            if child.dispatch_back() {
                return true;
            }
        }
        match &self.hooks.on_back {
            Some(f) => f(),
            None => false,
        }
    }

    /// Handles a back press: dispatches the signal, and terminates the
    /// screen if nothing consumed it.
    ///
    /// Returns `true` if the signal was consumed (the screen stays up).
    pub fn back_pressed(&mut self) -> bool {
        if self.dispatch_back() {
            return true;
        }
        tracing::debug!(target: targets::SCREEN, "back unhandled, terminating");
        self.terminate();
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn stages_run_in_order() {
        let trace = Arc::new(Mutex::new(Vec::new()));

        let args_trace = trace.clone();
        let widget_trace = trace.clone();
        let data_trace = trace.clone();
        let mut screen = Screen::new(
            ScreenHooks::new()
                .init_args(move |_: &()| {
                    args_trace.lock().push("args");
                    true
                })
                .init_widget(move || widget_trace.lock().push("widget"))
                .init_data(move || data_trace.lock().push("data")),
        );

        assert_eq!(screen.stage(), ScreenStage::Created);
        assert_eq!(screen.launch(&()), ScreenStage::DataLoaded);
        assert_eq!(*trace.lock(), vec!["args", "widget", "data"]);
    }

    #[test]
    fn failed_validation_terminates_before_widgets() {
        let widget_ran = Arc::new(Mutex::new(false));

        let recv = widget_ran.clone();
        let mut screen = Screen::new(
            ScreenHooks::new()
                .init_args(|_: &()| false)
                .init_widget(move || *recv.lock() = true),
        );

        assert_eq!(screen.launch(&()), ScreenStage::Terminated);
        assert!(!*widget_ran.lock());
    }

    #[test]
    fn missing_hooks_default_to_accept_and_no_op() {
        let mut screen = Screen::<()>::new(ScreenHooks::new());
        assert_eq!(screen.launch(&()), ScreenStage::DataLoaded);
    }

    #[test]
    fn relaunch_is_a_no_op() {
        let runs = Arc::new(Mutex::new(0));

        let recv = runs.clone();
        let mut screen = Screen::new(ScreenHooks::new().init_data(move || *recv.lock() += 1));

        screen.launch(&());
        assert_eq!(screen.launch(&()), ScreenStage::DataLoaded);
        assert_eq!(*runs.lock(), 1);
    }

    #[test]
    fn child_consumes_back_before_host() {
        let host_asked = Arc::new(Mutex::new(false));

        let recv = host_asked.clone();
        let mut host = Screen::new(ScreenHooks::new().on_back(move || {
            *recv.lock() = true;
            true
        }));

        let mut child = Screen::<()>::new(ScreenHooks::new().on_back(|| true));
        child.launch(&());
        host.add_child(child);
        host.launch(&());

        assert!(host.back_pressed());
        assert!(!*host_asked.lock());
        assert_eq!(host.stage(), ScreenStage::DataLoaded);
    }

    #[test]
    fn declining_children_fall_through_to_host() {
        let mut host = Screen::<()>::new(ScreenHooks::new().on_back(|| true));
        let mut child = Screen::<()>::new(ScreenHooks::new());
        child.launch(&());
        host.add_child(child);
        host.launch(&());

        assert!(host.back_pressed());
        assert_eq!(host.stage(), ScreenStage::DataLoaded);
    }

    #[test]
    fn terminated_child_never_consumes_back() {
        let mut host = Screen::<()>::new(ScreenHooks::new());
        let mut child = Screen::<()>::new(ScreenHooks::new().on_back(|| true));
        child.launch(&());
        child.terminate();
        host.add_child(child);
        host.launch(&());

        // Nobody consumes: the host terminates itself.
        assert!(!host.back_pressed());
        assert_eq!(host.stage(), ScreenStage::Terminated);
    }

    #[test]
    fn unhandled_back_terminates_the_screen() {
        let mut screen = Screen::<()>::new(ScreenHooks::new());
        screen.launch(&());

        assert!(!screen.back_pressed());
        assert_eq!(screen.stage(), ScreenStage::Terminated);
        // Further back presses are inert.
        assert!(!screen.dispatch_back());
    }
}
