//! Main playground component.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::console;
use ottl_playground::{
    Phase, PlaygroundController, PlaygroundOptions, WasmStatus, examples_for, find_example,
    share_url,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::clipboard::copy_text;
use crate::components::{ConfigPanel, PayloadPanel, PlaygroundControls, ResultPanel};
use crate::host::{dom_event_bridge, location_hash, page_href, set_location_hash};
use crate::wasm::{JsStatementsExecutor, load_evaluator_module};

type Controller = PlaygroundController<JsStatementsExecutor>;

#[derive(Properties, PartialEq)]
pub struct PlaygroundProps {
    pub options: PlaygroundOptions,
    /// Element run-result events are dispatched on.
    #[prop_or_default]
    pub host: Option<web_sys::Element>,
}

/// The playground shell.
#[function_component(Playground)]
pub fn playground(props: &PlaygroundProps) -> Html {
    let controller: Rc<RefCell<Controller>> = use_mut_ref(|| {
        let mut controller = PlaygroundController::new(props.options.clone(), JsStatementsExecutor);
        controller.subscribe(dom_event_bridge(props.host.clone()));
        controller
    });
    let force_update = use_force_update();

    // First render: restore a shared link and start loading the evaluator.
    {
        let controller = controller.clone();
        let force_update = force_update.clone();
        let base_url = props.options.base_url.clone();
        use_effect_with((), move |_| {
            let alive = Rc::new(Cell::new(true));

            controller
                .borrow_mut()
                .first_rendered(location_hash().as_deref());
            force_update.force_update();

            {
                let alive = alive.clone();
                spawn_local(async move {
                    let loaded = load_evaluator_module(&base_url).await;
                    if !alive.get() {
                        return;
                    }
                    match loaded {
                        Ok(()) => controller.borrow_mut().wasm_loaded(),
                        Err(e) => {
                            console::error!("failed to load the evaluator module:", e.to_string());
                            controller.borrow_mut().wasm_failed(e.to_string());
                        }
                    }
                    force_update.force_update();
                });
            }

            move || alive.set(false)
        });
    }

    let on_config_change = {
        let controller = controller.clone();
        let force_update = force_update.clone();
        Callback::from(move |config: String| {
            controller.borrow_mut().set_config(config);
            force_update.force_update();
        })
    };

    let on_payload_change = {
        let controller = controller.clone();
        let force_update = force_update.clone();
        Callback::from(move |payload: String| {
            controller.borrow_mut().set_payload(payload);
            force_update.force_update();
        })
    };

    let on_evaluator_change = {
        let controller = controller.clone();
        let force_update = force_update.clone();
        Callback::from(move |evaluator: String| {
            controller.borrow_mut().set_evaluator(evaluator);
            force_update.force_update();
        })
    };

    let on_example_select = {
        let controller = controller.clone();
        let force_update = force_update.clone();
        Callback::from(move |name: String| {
            let mut controller = controller.borrow_mut();
            let evaluator = controller.state().evaluator.clone();
            if let Some(example) = find_example(&evaluator, &name) {
                controller.select_config_example(example);
                drop(controller);
                force_update.force_update();
            }
        })
    };

    let on_run = {
        let controller = controller.clone();
        let force_update = force_update.clone();
        Callback::from(move |_: ()| {
            if let Err(e) = controller.borrow_mut().run() {
                console::log!("run rejected:", e.to_string());
            }
            force_update.force_update();
        })
    };

    let on_copy_link = {
        let controller = controller.clone();
        Callback::from(move |_: ()| {
            let Some(token) = controller.borrow().share_token() else {
                return;
            };
            let link = page_href()
                .map(|href| share_url(&href, &token))
                .unwrap_or_else(|| format!("#{}", token));
            spawn_local(async move {
                if let Err(e) = copy_text(&link).await {
                    console::error!("failed to copy the share link", e);
                }
            });
            if let Err(e) = set_location_hash(&token) {
                console::error!("failed to update the location hash", e);
            }
        })
    };

    let c = controller.borrow();
    let state = c.state();
    let options = c.options();
    let wasm_error = match c.wasm_status() {
        WasmStatus::Failed(message) => Some(message.clone()),
        _ => None,
    };

    html! {
        <div class="app">
            if c.phase() == Phase::Loading {
                <div id="loading" class="loading">{ "Loading..." }</div>
            }
            <div class="playground" id="playground">
                <PlaygroundControls
                    title={options.title.clone()}
                    evaluator={state.evaluator.clone()}
                    evaluators={c.evaluators().to_vec()}
                    hide_evaluators={options.hide_evaluators}
                    hide_run_button={options.hide_run_button}
                    hide_copy_link_button={options.disable_share_link}
                    loading={c.is_wasm_loading()}
                    run_disabled={!c.can_run()}
                    {on_evaluator_change}
                    {on_copy_link}
                    {on_run}
                />
                <main class="main split-horizontal">
                    <div id="left-panel" class="split-vertical">
                        <ConfigPanel
                            config={state.config.clone()}
                            examples={examples_for(&state.evaluator)}
                            docs_url={c.docs_url().map(str::to_string)}
                            on_change={on_config_change}
                            {on_example_select}
                        />
                        <PayloadPanel
                            payload={state.payload.clone()}
                            selected_example={c.selected_payload_example()}
                            on_change={on_payload_change}
                        />
                    </div>
                    <div id="right-panel" class="hidden-overflow">
                        <ResultPanel
                            result={c.result().cloned()}
                            run_error={c.run_error().map(str::to_string)}
                            {wasm_error}
                        />
                    </div>
                </main>
            </div>
            <footer class="footer">
                <span class="footer-build">
                    { format!("Build: {} {}", env!("BUILD_COMMIT"), env!("BUILD_TIMESTAMP")) }
                </span>
            </footer>
        </div>
    }
}
