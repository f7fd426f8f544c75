#[cfg(any(target_arch = "wasm32", test))]
mod page;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;

    use portal_client_core::auth::{DEFAULT_API_BASE_URL, normalize_base_url};
    use portal_client_core::pages::{
        ChatView, LoginOutcome, SignupOutcome, load_admin_page, load_content_page,
        load_dashboard_page, load_events_page, load_messages_page, logout, submit_login,
        submit_signup,
    };
    use portal_client_core::PageError;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::spawn_local;

    use crate::page::PortalPage;

    mod dom;
    mod network;
    mod storage;

    use dom::{DomSurface, console_error, document};
    use network::GlooTransport;
    use storage::LocalStorageTokenStore;

    const LOGIN_FORM_ID: &str = "loginForm";
    const SIGNUP_FORM_ID: &str = "signupForm";
    const MESSAGE_FORM_ID: &str = "messageForm";
    const LOGOUT_BUTTON_ID: &str = "logoutButton";

    thread_local! {
        static BASE_URL: RefCell<String> = RefCell::new(DEFAULT_API_BASE_URL.to_string());
        static CHAT_VIEW: RefCell<ChatView> = RefCell::new(ChatView::default());
        static EVENT_HANDLERS: RefCell<Vec<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(Vec::new()) };
    }

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        if let Err(error) = boot() {
            console_error("portal boot failed", &error);
        }
    }

    fn boot() -> Result<(), String> {
        let document = document()?;
        let body = document
            .body()
            .ok_or_else(|| "document body is unavailable".to_string())?;

        if let Some(raw) = body.get_attribute("data-api-base-url") {
            let base_url = normalize_base_url(&raw).map_err(|error| error.to_string())?;
            BASE_URL.with(|slot| *slot.borrow_mut() = base_url);
        }

        let page = match body.get_attribute("data-page") {
            Some(raw) => PortalPage::from_attr(&raw).map_err(|error| error.to_string())?,
            None => {
                let path = web_sys::window()
                    .and_then(|window| window.location().pathname().ok())
                    .unwrap_or_default();
                PortalPage::from_path(&path)
                    .ok_or_else(|| format!("cannot tell which portal page {path} is"))?
            }
        };

        match page {
            PortalPage::Login => bind_submit(LOGIN_FORM_ID, login_submit),
            PortalPage::Signup => bind_submit(SIGNUP_FORM_ID, signup_submit),
            PortalPage::MemberDashboard
            | PortalPage::AdminDashboard
            | PortalPage::Content
            | PortalPage::Events => spawn_page_load(page),
            PortalPage::Messages => {
                bind_submit(MESSAGE_FORM_ID, messages_send);
                bind_click(LOGOUT_BUTTON_ID, messages_logout);
                spawn_page_load(page);
            }
        }
        Ok(())
    }

    fn transport() -> GlooTransport {
        GlooTransport::new(BASE_URL.with(|slot| slot.borrow().clone()))
    }

    fn spawn_page_load(page: PortalPage) {
        spawn_local(async move {
            let transport = transport();
            let store = LocalStorageTokenStore;
            let mut surface = match DomSurface::new() {
                Ok(surface) => surface,
                Err(error) => {
                    console_error("portal page unavailable", &error);
                    return;
                }
            };
            let result = match page {
                PortalPage::MemberDashboard => {
                    load_dashboard_page(&transport, &store, &mut surface)
                        .await
                        .map(|_| ())
                }
                PortalPage::AdminDashboard => load_admin_page(&transport, &store, &mut surface)
                    .await
                    .map(|_| ()),
                PortalPage::Content => load_content_page(&transport, &store, &mut surface)
                    .await
                    .map(|_| ()),
                PortalPage::Events => load_events_page(&transport, &store, &mut surface)
                    .await
                    .map(|_| ()),
                PortalPage::Messages => load_messages_page(&transport, &store, &mut surface)
                    .await
                    .map(|_| ()),
                PortalPage::Login | PortalPage::Signup => Ok(()),
            };
            if let Err(error) = result {
                report_console(page, &error);
            }
        });
    }

    fn report_console(page: PortalPage, error: &PageError) {
        console_error(
            &format!("error loading {}", page.attr()),
            &format!("{} ({})", error, error.kind()),
        );
    }

    fn bind_submit(form_id: &str, handler: fn(web_sys::Event)) {
        bind_event(form_id, "submit", handler);
    }

    fn bind_click(element_id: &str, handler: fn()) {
        bind_event(element_id, "click", move |_event| handler());
    }

    fn bind_event(
        element_id: &str,
        event_name: &str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) {
        let Ok(document) = document() else {
            return;
        };
        let Some(element) = document.get_element_by_id(element_id) else {
            return;
        };
        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(handler));
        let _ = element
            .add_event_listener_with_callback(event_name, callback.as_ref().unchecked_ref());
        EVENT_HANDLERS.with(|slot| slot.borrow_mut().push(callback));
    }

    #[wasm_bindgen]
    pub fn login_submit(event: web_sys::Event) {
        event.prevent_default();
        spawn_local(async {
            let Ok(mut surface) = DomSurface::new() else {
                return;
            };
            let outcome = submit_login(&transport(), &LocalStorageTokenStore, &mut surface).await;
            if outcome == LoginOutcome::ServerError {
                console_error("login failed", "server error");
            }
        });
    }

    #[wasm_bindgen]
    pub fn signup_submit(event: web_sys::Event) {
        event.prevent_default();
        spawn_local(async {
            let Ok(mut surface) = DomSurface::new() else {
                return;
            };
            let outcome = submit_signup(&transport(), &mut surface).await;
            if outcome == SignupOutcome::ServerError {
                console_error("signup failed", "server error");
            }
        });
    }

    /// Invoked from a conversation list item.
    #[wasm_bindgen]
    pub fn messages_select(name: String) {
        let Ok(mut surface) = DomSurface::new() else {
            return;
        };
        CHAT_VIEW.with(|view| view.borrow_mut().select_conversation(&name, &mut surface));
    }

    #[wasm_bindgen]
    pub fn messages_send(event: web_sys::Event) {
        event.prevent_default();
        spawn_local(async {
            let Ok(mut surface) = DomSurface::new() else {
                return;
            };
            let mut view = CHAT_VIEW.with(|view| view.borrow().clone());
            view.send_message(&transport(), &LocalStorageTokenStore, &mut surface)
                .await;
            // A conversation picked while the request was in flight wins.
            CHAT_VIEW.with(|slot| {
                let mut slot = slot.borrow_mut();
                if slot.partner() == view.partner() {
                    *slot = view;
                }
            });
        });
    }

    #[wasm_bindgen]
    pub fn messages_logout() {
        if let Err(error) = logout(&LocalStorageTokenStore) {
            console_error("logout failed", &error.to_string());
        }
    }
}
