use crate::config;
use crate::events::AppEvent;
use crate::gui::rows;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::wheel::{self, Tick, WHEEL_SIZE, WheelView};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use spindle::{EntryError, Session, SessionError, Settle, SpinHandle};
use std::cell::RefCell;
use std::rc::Rc;

const EMPTY_RENAME_ERROR: &str = "An entry can't be empty";

pub struct AppModel {
    pub session: Rc<RefCell<Session>>,
    pub wheel_view: Rc<RefCell<WheelView>>,
    pub input_error: Option<String>,
    /// Rejected rename, shown under the row it belongs to.
    pub row_error: Option<(usize, String)>,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
    pub input: gtk::Entry,
    pub entry_list: gtk::ListBox,
    pub history_list: gtk::ListBox,
}

#[derive(Debug)]
pub enum AppMsg {
    Submit,
    InputChanged,
    Rename(usize, String),
    Remove(usize),
    ClearAll,
    Spin,
    SpinSettled(SpinHandle),
    ConfigReload,
}

/// Which control an entry error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edit {
    Add,
    Rename(usize),
    Other,
}

#[derive(Debug, PartialEq)]
enum Feedback {
    /// Under the add field.
    Input(String),
    /// Under the row being renamed.
    Row(usize, String),
    Alert { message: &'static str, detail: String },
    Log(String),
}

fn feedback(error: SessionError, edit: Edit) -> Feedback {
    match (error, edit) {
        (SessionError::Entry(EntryError::DuplicateLabel(label)), _) => Feedback::Alert {
            message: "Duplicate entry",
            detail: format!("'{}' is already on the wheel.", label),
        },
        (SessionError::Entry(e @ EntryError::EmptyLabel), Edit::Add) => {
            Feedback::Input(e.to_string())
        }
        (SessionError::Entry(EntryError::EmptyLabel), Edit::Rename(index)) => {
            Feedback::Row(index, EMPTY_RENAME_ERROR.to_string())
        }
        (other, _) => Feedback::Log(other.to_string()),
    }
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Session, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Spinner"),
            set_default_size: (1040, 600),

            gtk::Box {
                set_orientation: gtk::Orientation::Horizontal,
                set_spacing: 32,
                set_margin_top: 24,
                set_margin_bottom: 24,
                set_margin_start: 24,
                set_margin_end: 24,

                gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 12,

                    gtk::Label {
                        set_label: "Spin history:",
                        set_halign: gtk::Align::Start,
                        add_css_class: "title-3",
                    },

                    gtk::ScrolledWindow {
                        set_vexpand: true,
                        set_min_content_width: 208,
                        set_hscrollbar_policy: gtk::PolicyType::Never,

                        #[name = "history_list"]
                        gtk::ListBox {
                            set_selection_mode: gtk::SelectionMode::None,
                        },
                    },
                },

                gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 24,
                    set_hexpand: true,

                    #[name = "drawing_area"]
                    gtk::DrawingArea {
                        set_content_width: WHEEL_SIZE,
                        set_content_height: WHEEL_SIZE,
                        set_hexpand: true,
                        set_vexpand: true,
                    },

                    gtk::Button {
                        set_label: "SPIN",
                        set_halign: gtk::Align::Center,
                        add_css_class: "suggested-action",
                        add_css_class: "spin-button",
                        #[watch]
                        set_sensitive: model.session.borrow().can_spin(),
                        connect_clicked => AppMsg::Spin,
                    },
                },

                gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 12,
                    set_width_request: 256,
                    #[watch]
                    set_sensitive: !model.session.borrow().is_spinning(),

                    gtk::Label {
                        set_label: "Entries:",
                        set_halign: gtk::Align::Start,
                        add_css_class: "title-3",
                    },

                    gtk::Box {
                        set_orientation: gtk::Orientation::Horizontal,
                        set_spacing: 6,

                        #[name = "input"]
                        gtk::Entry {
                            set_placeholder_text: Some("Add value to spinner"),
                            set_hexpand: true,
                            connect_activate => AppMsg::Submit,
                            connect_changed => AppMsg::InputChanged,
                        },

                        gtk::Button {
                            set_icon_name: "list-add-symbolic",
                            set_tooltip_text: Some("Add entry"),
                            connect_clicked => AppMsg::Submit,
                        },
                    },

                    gtk::Label {
                        set_halign: gtk::Align::Start,
                        add_css_class: "input-error",
                        #[watch]
                        set_visible: model.input_error.is_some(),
                        #[watch]
                        set_label: model.input_error.as_deref().unwrap_or_default(),
                    },

                    gtk::ScrolledWindow {
                        set_vexpand: true,
                        set_hscrollbar_policy: gtk::PolicyType::Never,

                        #[name = "entry_list"]
                        gtk::ListBox {
                            set_selection_mode: gtk::SelectionMode::None,
                        },
                    },

                    gtk::Button {
                        set_label: "Clear all entries",
                        add_css_class: "destructive-action",
                        #[watch]
                        set_visible: !model.session.borrow().entries().is_empty(),
                        connect_clicked => AppMsg::ClearAll,
                    },
                },
            },
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (session, rx) = init;

        theme::load_css();

        let model = AppModel {
            session: Rc::new(RefCell::new(session)),
            wheel_view: Rc::new(RefCell::new(WheelView::default())),
            input_error: None,
            row_error: None,
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
            input: gtk::Entry::default(),
            entry_list: gtk::ListBox::default(),
            history_list: gtk::ListBox::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();
        model.input = widgets.input.clone();
        model.entry_list = widgets.entry_list.clone();
        model.history_list = widgets.history_list.clone();

        let state_draw = model.session.clone();
        let view_draw = model.wheel_view.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                #[allow(deprecated)]
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                let session = state_draw.borrow();
                if let Err(e) = wheel::draw(
                    cr,
                    session.entries(),
                    session.colors(),
                    view_draw.borrow().rotation(),
                    width as f64,
                    height as f64,
                    &colors,
                ) {
                    log::error!("Drawing error: {}", e);
                }
            });

        model.refresh_entries(&sender);
        model.refresh_history();

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Submit => {
                let text = self.input.text().to_string();
                let result = self.session.borrow_mut().add_entry(text);
                match result {
                    Ok(()) => {
                        self.input.set_text("");
                        self.input_error = None;
                        self.row_error = None;
                        self.entries_changed(&sender);
                    }
                    Err(e) => self.show_error(e, Edit::Add),
                }
            }
            AppMsg::InputChanged => {
                self.input_error = None;
            }
            AppMsg::Rename(index, text) => {
                let result = self.session.borrow_mut().rename_entry(index, text);
                match result {
                    Ok(()) => self.row_error = None,
                    Err(e) => self.show_error(e, Edit::Rename(index)),
                }
                // rebuild so a rejected edit shows the stored label again
                self.entries_changed(&sender);
            }
            AppMsg::Remove(index) => {
                let result = self.session.borrow_mut().remove_entry(index);
                match result {
                    Ok(_) => {
                        self.row_error = None;
                        self.entries_changed(&sender);
                    }
                    Err(e) => self.show_error(e, Edit::Other),
                }
            }
            AppMsg::ClearAll => {
                let result = self.session.borrow_mut().clear_entries();
                match result {
                    Ok(()) => {
                        self.row_error = None;
                        self.entries_changed(&sender);
                    }
                    Err(e) => self.show_error(e, Edit::Other),
                }
            }
            AppMsg::Spin => self.start_spin(sender),
            AppMsg::SpinSettled(handle) => {
                let result = self
                    .session
                    .borrow_mut()
                    .complete_spin(&handle)
                    .map(|_| ());
                match result {
                    Ok(()) => {
                        let rotation = self.session.borrow().wheel().rotation();
                        self.wheel_view.borrow_mut().rest_at(rotation);
                        self.refresh_history();
                        self.drawing_area.queue_draw();
                    }
                    Err(e) => log::warn!("Ignoring spin completion: {}", e),
                }
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => match new_config.palette() {
                    Ok(palette) => {
                        {
                            let mut session = self.session.borrow_mut();
                            session.set_palette(palette);
                            session.set_spin_settings(new_config.spin);
                        }
                        self.entries_changed(&sender);
                        log::info!("Configuration reloaded");
                    }
                    Err(e) => log::error!("Failed to reload config: {}", e),
                },
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}

impl AppModel {
    fn start_spin(&mut self, sender: ComponentSender<Self>) {
        let handle = match self.session.borrow_mut().request_spin() {
            Ok(handle) => handle,
            Err(e) => {
                log::warn!("Spin rejected: {}", e);
                return;
            }
        };

        self.wheel_view.borrow_mut().start(handle.clone());

        let view = self.wheel_view.clone();
        let tick_sender = sender.clone();
        self.drawing_area.add_tick_callback(move |area, clock| {
            let tick = view.borrow_mut().tick(clock.frame_time());
            area.queue_draw();
            match tick {
                Tick::Running => glib::ControlFlow::Continue,
                Tick::Finished(handle) => {
                    if handle.settle == Settle::Transition {
                        tick_sender.input(AppMsg::SpinSettled(handle));
                    }
                    glib::ControlFlow::Break
                }
                Tick::Idle => glib::ControlFlow::Break,
            }
        });

        if handle.settle == Settle::Timer {
            glib::timeout_add_local_once(handle.duration, move || {
                sender.input(AppMsg::SpinSettled(handle));
            });
        }
    }

    fn show_error(&mut self, error: SessionError, edit: Edit) {
        match feedback(error, edit) {
            Feedback::Input(message) => self.input_error = Some(message),
            Feedback::Row(index, message) => self.row_error = Some((index, message)),
            Feedback::Alert { message, detail } => {
                let dialog = gtk::AlertDialog::builder()
                    .modal(true)
                    .message(message)
                    .detail(detail)
                    .build();
                dialog.show(Some(&self.root));
            }
            Feedback::Log(message) => log::warn!("{}", message),
        }
    }

    fn entries_changed(&self, sender: &ComponentSender<Self>) {
        self.refresh_entries(sender);
        self.drawing_area.queue_draw();
    }

    fn refresh_entries(&self, sender: &ComponentSender<Self>) {
        let session = self.session.borrow();
        let rows = session
            .entries()
            .iter()
            .zip(session.colors())
            .enumerate()
            .map(|(i, (entry, color))| {
                let error = self
                    .row_error
                    .as_ref()
                    .filter(|(index, _)| *index == i)
                    .map(|(_, message)| message.as_str());
                rows::entry_row(i, entry.label(), *color, error, sender)
            });
        rows::replace_rows(&self.entry_list, rows);
    }

    fn refresh_history(&self) {
        let session = self.session.borrow();
        rows::replace_rows(
            &self.history_list,
            session.history().iter().map(rows::history_row),
        );
    }
}
