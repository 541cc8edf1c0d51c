use dioxus::prelude::*;

use crate::components::app_view::AppView;

const NAV_HISTORY_LIMIT: usize = 16;

/// View switching with a bounded back stack.
#[derive(Clone, Copy)]
pub struct Navigation {
    current_view: Signal<AppView>,
    history: Signal<Vec<AppView>>,
}

impl Navigation {
    pub fn new(current_view: Signal<AppView>, history: Signal<Vec<AppView>>) -> Self {
        Self {
            current_view,
            history,
        }
    }

    pub fn current(&self) -> AppView {
        (self.current_view)()
    }

    pub fn navigate_to(&self, target: AppView) {
        let mut current_view = self.current_view;
        let previous = *current_view.peek();
        if previous == target {
            return;
        }

        let mut history = self.history;
        history.with_mut(|stack| {
            stack.push(previous);
            if stack.len() > NAV_HISTORY_LIMIT {
                stack.remove(0);
            }
        });

        current_view.set(target);
    }

    /// Return to the previous view; `None` when the history is empty.
    pub fn go_back(&self) -> Option<AppView> {
        let mut history = self.history;
        let prev = history.with_mut(|stack| stack.pop());
        prev.inspect(|prev| {
            let mut current_view = self.current_view;
            current_view.set(*prev);
        })
    }
}
