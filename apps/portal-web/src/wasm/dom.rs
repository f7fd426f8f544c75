use std::cell::RefCell;

use portal_client_core::{ContentCard, Destination, Input, PageSurface, Region, TranscriptLine};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlInputElement, HtmlTextAreaElement};

thread_local! {
    static LIST_CLICK_HANDLERS: RefCell<Vec<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(Vec::new()) };
    static CARD_CLICK_HANDLERS: RefCell<Vec<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(Vec::new()) };
}

pub(super) fn document() -> Result<Document, String> {
    web_sys::window()
        .ok_or_else(|| "window is unavailable".to_string())?
        .document()
        .ok_or_else(|| "document is unavailable".to_string())
}

pub(super) fn console_error(context: &str, detail: &str) {
    web_sys::console::error_2(&JsValue::from_str(context), &JsValue::from_str(detail));
}

/// [`PageSurface`] over the live document. Regions are found by id; pages
/// that only mark their sections with `.card` are reached through the
/// region's legacy card slot.
///
/// All text is written as text nodes, never as markup.
pub(super) struct DomSurface {
    window: web_sys::Window,
    document: Document,
}

impl DomSurface {
    pub(super) fn new() -> Result<Self, String> {
        let window = web_sys::window().ok_or_else(|| "window is unavailable".to_string())?;
        let document = window
            .document()
            .ok_or_else(|| "document is unavailable".to_string())?;
        Ok(Self { window, document })
    }

    fn region(&self, region: Region, legacy_child: &str) -> Option<Element> {
        if let Some(element) = self.document.get_element_by_id(region.dom_id()) {
            return Some(element);
        }
        let slot = region.legacy_card_slot()?;
        let cards = self.document.query_selector_all(".card").ok()?;
        let card = cards.item(slot as u32)?.dyn_into::<Element>().ok()?;
        card.query_selector(legacy_child).ok()?
    }

    fn missing(&self, region: Region) {
        console_error("portal region not found", region.dom_id());
    }

    fn create(&self, tag: &str) -> Option<Element> {
        self.document.create_element(tag).ok()
    }

    fn transcript_paragraph(&self, line: &TranscriptLine) -> Option<Element> {
        let paragraph = self.create("p")?;
        let speaker = self.create("strong")?;
        speaker.set_text_content(Some(&format!("{}:", line.speaker)));
        paragraph.append_child(&speaker).ok()?;
        let text = self.document.create_text_node(&format!(" {}", line.text));
        paragraph.append_child(&text).ok()?;
        Some(paragraph)
    }

    fn input_value(&self, input: Input) -> Option<String> {
        let element = self.document.get_element_by_id(input.dom_id())?;
        match element.dyn_into::<HtmlInputElement>() {
            Ok(field) => Some(field.value()),
            Err(element) => element
                .dyn_into::<HtmlTextAreaElement>()
                .ok()
                .map(|field| field.value()),
        }
    }
}

impl PageSurface for DomSurface {
    fn alert(&mut self, message: &str) {
        let _ = self.window.alert_with_message(message);
    }

    fn navigate(&mut self, destination: Destination) {
        let _ = self.window.location().set_href(destination.path());
    }

    fn set_text(&mut self, region: Region, text: &str) {
        match self.region(region, "p") {
            Some(element) => element.set_text_content(Some(text)),
            None => self.missing(region),
        }
    }

    fn replace_list(&mut self, region: Region, items: &[String]) {
        let Some(list) = self.region(region, "ul") else {
            self.missing(region);
            return;
        };
        list.set_text_content(None);
        let selectable = region == Region::ConversationList;
        if selectable {
            LIST_CLICK_HANDLERS.with(|slot| slot.borrow_mut().clear());
        }
        for item in items {
            let Some(entry) = self.create("li") else {
                continue;
            };
            entry.set_text_content(Some(item));
            if selectable {
                let name = item.clone();
                let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
                    super::messages_select(name.clone());
                }));
                let _ = entry
                    .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
                LIST_CLICK_HANDLERS.with(|slot| slot.borrow_mut().push(callback));
            }
            let _ = list.append_child(&entry);
        }
    }

    fn replace_cards(&mut self, region: Region, cards: &[ContentCard]) {
        let Some(grid) = self.region(region, "div") else {
            self.missing(region);
            return;
        };
        grid.set_text_content(None);
        CARD_CLICK_HANDLERS.with(|slot| slot.borrow_mut().clear());
        for card in cards {
            let (Some(container), Some(title), Some(description), Some(button)) = (
                self.create("div"),
                self.create("h3"),
                self.create("p"),
                self.create("button"),
            ) else {
                continue;
            };
            let _ = container.class_list().add_1("card");
            title.set_text_content(Some(&card.heading));
            description.set_text_content(Some(&card.description));
            button.set_text_content(Some(card.action_label));

            let window = self.window.clone();
            let message = card.action_alert.clone();
            let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
                let _ = window.alert_with_message(&message);
            }));
            let _ = button
                .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
            CARD_CLICK_HANDLERS.with(|slot| slot.borrow_mut().push(callback));

            let _ = container.append_child(&title);
            let _ = container.append_child(&description);
            let _ = container.append_child(&button);
            let _ = grid.append_child(&container);
        }
    }

    fn replace_transcript(&mut self, lines: &[TranscriptLine]) {
        let Some(chat_box) = self.region(Region::ChatBox, "div") else {
            self.missing(Region::ChatBox);
            return;
        };
        chat_box.set_text_content(None);
        for line in lines {
            if let Some(paragraph) = self.transcript_paragraph(line) {
                let _ = chat_box.append_child(&paragraph);
            }
        }
    }

    fn append_transcript(&mut self, line: &TranscriptLine) {
        let Some(chat_box) = self.region(Region::ChatBox, "div") else {
            self.missing(Region::ChatBox);
            return;
        };
        if let Some(paragraph) = self.transcript_paragraph(line) {
            let _ = chat_box.append_child(&paragraph);
        }
        chat_box.set_scroll_top(chat_box.scroll_height());
    }

    fn read_input(&self, input: Input) -> String {
        self.input_value(input).unwrap_or_default()
    }

    fn clear_input(&mut self, input: Input) {
        let Some(element) = self.document.get_element_by_id(input.dom_id()) else {
            return;
        };
        match element.dyn_into::<HtmlInputElement>() {
            Ok(field) => field.set_value(""),
            Err(element) => {
                if let Ok(field) = element.dyn_into::<HtmlTextAreaElement>() {
                    field.set_value("");
                }
            }
        }
    }
}
