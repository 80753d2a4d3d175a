// the html! macro failed to build without this
#![recursion_limit = "256"]

use querytube_protocol as proto;
use tracing::error;
use wasm_bindgen::prelude::*;
use web_sys::HtmlInputElement;
use yew::prelude::*;

pub mod card;
pub mod query;
pub mod search;

use self::query::{Query, SEARCH_ENDPOINT};
use self::search::{Generations, SearchError, SearchState};

struct Model {
    query_input: NodeRef,
    state: SearchState,
    generations: Generations,
}

enum Msg {
    Submit,
    Settled {
        generation: u64,
        result: Result<proto::SearchResponse, SearchError>,
    },
}

fn alert(message: &str) {
    let window = web_sys::window().expect("must have JS window");
    if let Err(error) = window.alert_with_message(message) {
        error!(message = "alert failed", ?error);
    }
}

impl Model {
    fn submit(&mut self, ctx: &Context<Self>) -> bool {
        let raw = self
            .query_input
            .cast::<HtmlInputElement>()
            .map(|input| input.value())
            .unwrap_or_default();
        let query = match Query::parse(&raw) {
            Ok(query) => query,
            Err(error) => {
                // results area stays as it was
                alert(&error.to_string());
                return false;
            }
        };

        let generation = self.generations.next();
        self.state = SearchState::Loading;
        ctx.link().send_future(async move {
            let result = search::fetch(SEARCH_ENDPOINT, &query).await;
            Msg::Settled { generation, result }
        });
        true
    }

    fn view_results(&self) -> Html {
        match &self.state {
            SearchState::Idle | SearchState::Loading => html! {},
            SearchState::Empty => html! {
                <div style="grid-column: 1/-1; text-align:center; color:#ccc;">
                    <h3>{"No results found"}</h3>
                    <p>{"Try searching for something else."}</p>
                </div>
            },
            SearchState::ConnectionError => html! {
                <div style="grid-column: 1/-1; text-align:center; color:#ff5555;">
                    <h3>{"Connection Error"}</h3>
                    <p>{"Could not connect to the backend server."}</p>
                </div>
            },
            SearchState::Results(videos) => html! {
                <>
                    {for card::cards(videos).into_iter().map(|card| card.view())}
                </>
            },
        }
    }
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            query_input: NodeRef::default(),
            state: SearchState::Idle,
            generations: Generations::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Submit => self.submit(ctx),

            Msg::Settled { generation, result } => {
                search::apply(&mut self.state, &self.generations, generation, result)
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let onclick = ctx.link().callback(|_: MouseEvent| Msg::Submit);
        let onkeypress = ctx.link().batch_callback(|event: KeyboardEvent| {
            if event.key() == "Enter" {
                Some(Msg::Submit)
            } else {
                None
            }
        });
        let spinner = classes!("spinner", (!self.state.is_loading()).then(|| "hidden"));
        html! {
            <>
                <div class="search-bar">
                    <input
                        id="query"
                        ref={self.query_input.clone()}
                        placeholder="Search videos..."
                        onkeypress={onkeypress}
                    />
                    <button onclick={onclick}>{"Search"}</button>
                </div>
                <div id="loading-spinner" class={spinner}></div>
                <div id="results" class="results-grid">
                    {self.view_results()}
                </div>
            </>
        }
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    tracing_wasm::set_as_global_default();

    yew::start_app::<Model>();
}
