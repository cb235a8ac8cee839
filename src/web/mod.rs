//! JavaScript bindings.
//!
//! [`WebTerminal`] wraps a [`Terminal`] for the page script: it boots from
//! bundles served over HTTP, persists preferences in localStorage and
//! debounces suggestion lookups with browser timers. Results cross the
//! boundary as plain objects via `serde-wasm-bindgen`.

mod fetch;
mod logger;
mod storage;

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;
use log::{LevelFilter, warn};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::config::SETUP_DELAY_MS;
use crate::config::suggestions::DEBOUNCE_MS;
use crate::core::{
    AutocompleteResult, CommandResult, ConfigError, Effect, Suggestion, Terminal, load_config,
};
use crate::models::OutputLine;
use crate::utils::now_millis;

pub use fetch::HttpSource;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    logger::init(LevelFilter::Info);
}

fn to_js(error: ConfigError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// What the page needs to render one command.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RenderedResult<'a> {
    output: &'a [OutputLine],
    clear: bool,
    theme: Option<&'static str>,
    switch_distro: Option<&'a str>,
}

impl<'a> From<&'a CommandResult> for RenderedResult<'a> {
    fn from(result: &'a CommandResult) -> Self {
        let mut rendered = Self {
            output: &result.output,
            clear: false,
            theme: None,
            switch_distro: None,
        };
        match &result.effect {
            Some(Effect::ClearScreen) => rendered.clear = true,
            Some(Effect::ThemeChanged(theme)) => rendered.theme = Some(theme.as_str()),
            Some(Effect::SwitchDistro(key)) => rendered.switch_distro = Some(key.as_str()),
            None => {}
        }
        rendered
    }
}

/// Outcome of a Tab press.
#[derive(Serialize)]
struct Completion {
    completion: Option<String>,
    matches: Vec<Suggestion>,
}

impl From<AutocompleteResult> for Completion {
    fn from(result: AutocompleteResult) -> Self {
        match result {
            AutocompleteResult::Single(completion) => Self {
                completion: Some(completion),
                matches: Vec::new(),
            },
            AutocompleteResult::Multiple(matches) => Self {
                completion: None,
                matches,
            },
            AutocompleteResult::None => Self {
                completion: None,
                matches: Vec::new(),
            },
        }
    }
}

#[wasm_bindgen]
pub struct WebTerminal {
    inner: Rc<RefCell<Terminal>>,
    source: Rc<HttpSource>,
}

#[wasm_bindgen]
impl WebTerminal {
    /// Load the registry at `registry_location` (relative to `base_url`)
    /// and the last used distro, restore persisted history and theme, then
    /// wait out the setup delay.
    pub async fn boot(base_url: String, registry_location: String) -> Result<WebTerminal, JsValue> {
        let source = HttpSource::new(base_url);
        let preferred = storage::load_distro();

        let mut terminal = Terminal::boot(
            &source,
            &registry_location,
            preferred.as_deref(),
            now_millis(),
        )
        .await
        .map_err(to_js)?;
        terminal.restore_history(storage::load_history());
        if let Some(theme) = storage::load_theme() {
            terminal.set_theme(theme);
        }

        TimeoutFuture::new(SETUP_DELAY_MS).await;

        Ok(WebTerminal {
            inner: Rc::new(RefCell::new(terminal)),
            source: Rc::new(source),
        })
    }

    /// Run one line. Returns `{output, clear, theme, switchDistro}`.
    pub fn execute(&self, line: &str) -> Result<JsValue, JsValue> {
        let result = self.inner.borrow_mut().execute(line);

        storage::save_history(self.inner.borrow().history());
        if let Some(Effect::ThemeChanged(theme)) = result.effect {
            storage::save_theme(theme);
        }
        Ok(serde_wasm_bindgen::to_value(&RenderedResult::from(&result))?)
    }

    /// Debounced suggestion lookup; `callback` receives the list unless a
    /// newer keystroke, command or distro switch superseded it.
    pub fn suggest(&self, prefix: String, callback: js_sys::Function) {
        let ticket = self.inner.borrow_mut().schedule_suggestions();
        let inner = Rc::clone(&self.inner);

        Timeout::new(DEBOUNCE_MS, move || {
            let items = inner
                .borrow_mut()
                .apply_suggestions(ticket, &prefix)
                .map(<[Suggestion]>::to_vec);
            let Some(items) = items else {
                return;
            };
            match serde_wasm_bindgen::to_value(&items) {
                Ok(value) => {
                    if let Err(e) = callback.call1(&JsValue::NULL, &value) {
                        warn!("Suggestion callback failed: {:?}", e);
                    }
                }
                Err(e) => warn!("Could not serialize suggestions: {}", e),
            }
        })
        .forget();
    }

    pub fn select_next(&self) -> i32 {
        let mut terminal = self.inner.borrow_mut();
        terminal.suggestion_state_mut().select_next();
        selected_index(&terminal)
    }

    pub fn select_prev(&self) -> i32 {
        let mut terminal = self.inner.borrow_mut();
        terminal.suggestion_state_mut().select_prev();
        selected_index(&terminal)
    }

    /// Highlighted suggestion index, `-1` when nothing is highlighted.
    pub fn selected_index(&self) -> i32 {
        selected_index(&self.inner.borrow())
    }

    pub fn accept_suggestion(&self) -> Option<String> {
        self.inner.borrow_mut().suggestion_state_mut().accept()
    }

    pub fn tab(&self, input: &str) -> Result<JsValue, JsValue> {
        let completion = Completion::from(self.inner.borrow_mut().tab(input));
        Ok(serde_wasm_bindgen::to_value(&completion)?)
    }

    pub fn history_up(&self) -> String {
        self.inner.borrow_mut().history_up()
    }

    pub fn history_down(&self) -> String {
        self.inner.borrow_mut().history_down()
    }

    pub fn prompt(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.borrow().prompt())?)
    }

    pub fn stats(&self) -> Result<JsValue, JsValue> {
        let stats = self.inner.borrow().session_stats(now_millis());
        Ok(serde_wasm_bindgen::to_value(&stats)?)
    }

    pub fn motd(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.borrow().motd())?)
    }

    pub fn theme(&self) -> String {
        self.inner.borrow().theme().as_str().to_string()
    }

    /// Fetch and switch to `key`; resolves with the new distro's motd.
    /// On failure the current distro keeps running.
    pub fn switch_distro(&self, key: String) -> js_sys::Promise {
        let inner = Rc::clone(&self.inner);
        let source = Rc::clone(&self.source);

        future_to_promise(async move {
            let location = inner.borrow().config_location(&key).map_err(to_js)?;
            let config = load_config(source.as_ref(), &location)
                .await
                .map_err(to_js)?;
            inner.borrow_mut().reset(config, &key).map_err(to_js)?;
            storage::save_distro(&key);

            let motd = inner.borrow().motd();
            Ok(serde_wasm_bindgen::to_value(&motd)?)
        })
    }
}

fn selected_index(terminal: &Terminal) -> i32 {
    terminal
        .suggestion_state()
        .selected_index()
        .and_then(|i| i32::try_from(i).ok())
        .unwrap_or(-1)
}
