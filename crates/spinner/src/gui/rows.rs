use crate::gui::app::{AppModel, AppMsg};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::ComponentSender;
use spindle::{Color, HistoryEntry, Label};
use std::cell::Cell;
use std::rc::Rc;

const SWATCH_SIZE: i32 = 20;

pub fn swatch(color: Color) -> gtk::DrawingArea {
    let area = gtk::DrawingArea::new();
    area.set_content_width(SWATCH_SIZE);
    area.set_content_height(SWATCH_SIZE);
    area.set_valign(gtk::Align::Center);
    area.add_css_class("swatch");
    area.set_draw_func(move |_, cr, width, height| {
        let (r, g, b) = color.to_unit();
        cr.set_source_rgb(r, g, b);
        cr.rectangle(0.0, 0.0, width as f64, height as f64);
        if let Err(e) = cr.fill() {
            log::error!("Drawing error: {}", e);
        }
    });
    area
}

fn row_box() -> gtk::Box {
    let row = gtk::Box::new(gtk::Orientation::Horizontal, 8);
    row.set_margin_top(6);
    row.set_margin_bottom(6);
    row.set_margin_start(6);
    row.set_margin_end(6);
    row
}

pub fn history_row(entry: &HistoryEntry) -> gtk::Box {
    let row = row_box();
    row.append(&swatch(entry.color()));

    let label = gtk::Label::new(Some(entry.label().as_str()));
    label.set_halign(gtk::Align::Start);
    label.set_ellipsize(gtk::pango::EllipsizeMode::End);
    row.append(&label);
    row
}

/// The text to rename to, or `None` when the field still shows `original`.
pub fn edited_text(original: &Label, text: &str) -> Option<String> {
    (original.as_str() != text).then(|| text.to_string())
}

/// Swatch, editable label and delete button, with `error` underneath.
/// Enter or leaving the field commits an edit, once per row.
pub fn entry_row(
    index: usize,
    label: &Label,
    color: Color,
    error: Option<&str>,
    sender: &ComponentSender<AppModel>,
) -> gtk::Box {
    let row = row_box();
    row.append(&swatch(color));

    let field = gtk::Entry::new();
    field.set_text(label.as_str());
    field.set_hexpand(true);
    field.set_has_frame(false);
    if error.is_some() {
        field.add_css_class("error");
    }

    let commit = {
        let sender = sender.clone();
        let original = label.clone();
        let committed = Rc::new(Cell::new(false));
        move |field: &gtk::Entry| {
            if committed.get() {
                return;
            }
            if let Some(text) = edited_text(&original, &field.text()) {
                committed.set(true);
                sender.input(AppMsg::Rename(index, text));
            }
        }
    };
    {
        let commit = commit.clone();
        field.connect_activate(move |field| commit(field));
    }
    let focus = gtk::EventControllerFocus::new();
    {
        let field = field.downgrade();
        focus.connect_leave(move |_| {
            if let Some(field) = field.upgrade() {
                commit(&field);
            }
        });
    }
    field.add_controller(focus);
    row.append(&field);

    let delete = gtk::Button::from_icon_name("user-trash-symbolic");
    delete.add_css_class("flat");
    delete.set_tooltip_text(Some("Remove entry"));
    {
        let sender = sender.clone();
        delete.connect_clicked(move |_| {
            sender.input(AppMsg::Remove(index));
        });
    }
    row.append(&delete);

    let Some(error) = error else {
        return row;
    };
    let column = gtk::Box::new(gtk::Orientation::Vertical, 0);
    column.append(&row);
    let message = gtk::Label::new(Some(error));
    message.set_halign(gtk::Align::Start);
    message.set_margin_start(6);
    message.set_margin_bottom(6);
    message.add_css_class("input-error");
    column.append(&message);
    column
}

pub fn replace_rows<W: IsA<gtk::Widget>>(list: &gtk::ListBox, rows: impl IntoIterator<Item = W>) {
    while let Some(child) = list.first_child() {
        list.remove(&child);
    }
    for row in rows {
        list.append(&row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unchanged_text_is_not_an_edit() {
        let label = Label::new("Tea");
        assert_eq!(edited_text(&label, "Tea"), None);
        assert_eq!(edited_text(&label, "Green tea"), Some("Green tea".to_string()));
        assert_eq!(edited_text(&label, ""), Some(String::new()));
    }
}
