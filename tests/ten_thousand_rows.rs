use std::sync::Arc;

use parking_lot::Mutex;
use recycling_list::widgets::{TextDisplay, TextIo};
use recycling_list::{
    Display, Event, HeadlessHost, ListConfig, ListElement, RecyclingList, TextList,
    TriggerOnHover,
};

fn numbered(count: usize) -> Vec<String> {
    (0..count).map(|i| i.to_string()).collect()
}

fn texts(list: &TextList<HeadlessHost<TextDisplay>>) -> Vec<String> {
    list.visible_range()
        .filter_map(|index| list.display_element(index).map(TextDisplay::text))
        .collect()
}

#[test]
fn labels_scroll_through_ten_thousand_rows() {
    let mut list: TextList<_> = RecyclingList::new(HeadlessHost::new(200., TextDisplay::new));
    list.set_list(numbered(10_000));

    assert_eq!(list.row_height(), 40.);
    assert_eq!(list.pool_len(), 7);
    assert_eq!(texts(&list), ["0", "1", "2", "3", "4", "5", "6"]);

    list.host_mut().scroll_to(123.);
    assert!(list.update());
    assert_eq!(list.current_start_index(), 3);
    assert_eq!(texts(&list), ["3", "4", "5", "6", "7", "8", "9"]);

    // Frames without movement do no work.
    for _ in 0..10 {
        assert!(!list.update());
    }

    list.host_mut().scroll_to(399_800.);
    assert!(list.update());
    assert_eq!(list.current_start_index(), 9_995);
    assert_eq!(texts(&list), ["9995", "9996", "9997", "9998", "9999"]);
    assert_eq!(list.host().instantiated(), 7);
}

#[test]
fn text_fields_commit_edits_in_a_writable_list() {
    let host = HeadlessHost::new(200., TextIo::new).with_focus(TextIo::is_focused);
    let mut list: TextList<_> =
        RecyclingList::with_config(host, ListConfig::default().read_only(false));
    list.set_list(numbered(10_000));
    let committed = Arc::new(Mutex::new(Vec::new()));
    let _commits = list.on_value_edit_end().subscribe({
        let committed = committed.clone();
        move |(index, value): &(usize, String)| committed.lock().push((*index, value.clone()))
    });

    list.host_mut().scroll_to(4_000.);
    list.update();
    let field = list.display_element(101).expect("bound");
    field.select();
    assert!(list.has_focus());
    field.type_text("one hundred one");
    field.end_edit();

    assert!(!list.has_focus());
    assert_eq!(*committed.lock(), [(101, String::from("one hundred one"))]);
    assert_eq!(list.value(101).as_deref(), Some("one hundred one"));
}

/// An element for numeric rows that only reports hovering.
#[derive(Default)]
struct Counter {
    shown: Mutex<Option<u32>>,
    enter: Event<()>,
    exit: Event<()>,
}

impl Display<u32> for Counter {
    fn display(&self, value: &u32) {
        *self.shown.lock() = Some(*value);
    }
}

impl TriggerOnHover for Counter {
    fn on_pointer_enter(&self) -> &Event<()> {
        &self.enter
    }

    fn on_pointer_exit(&self) -> &Event<()> {
        &self.exit
    }
}

impl ListElement<u32> for Counter {
    fn set_active(&self, _active: bool) {}

    fn set_vertical_position(&self, _y: f32) {}

    fn as_hoverable(&self) -> Option<&dyn TriggerOnHover> {
        Some(self)
    }
}

#[test]
fn elements_only_forward_the_capabilities_they_have() {
    let mut list: RecyclingList<u32, _> = RecyclingList::with_config(
        HeadlessHost::new(100., Counter::default),
        ListConfig::default().row_height(20.),
    );
    list.set_list((0..1_000).map(|i| i * 2).collect());
    let hovered = Arc::new(Mutex::new(Vec::new()));
    let _enter = list.on_pointer_enter().subscribe({
        let hovered = hovered.clone();
        move |index: &usize| hovered.lock().push(*index)
    });

    list.host_mut().scroll_to(200.);
    list.update();
    let counter = list.display_element(12).expect("bound");
    counter.enter.notify();
    counter.exit.notify();

    assert_eq!(*counter.shown.lock(), Some(24));
    assert_eq!(*hovered.lock(), [12]);
    assert_eq!(list.pool_len(), 7);
    assert_eq!(list.on_click().subscribers(), 0);
}
