use crate::config::{self, Config, Overrides};
use crate::events::AppEvent;
use crate::gui::menu::{self, Preview};
use crate::gui::theme::{self, ThemeColors};
use exmenu::Activation;
use exmenu::geometry::Point;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

pub struct AppModel {
    pub preview: Rc<RefCell<Preview>>,
    pub overrides: Overrides,
    pub preview_enabled: bool,
    pub puppet_label: Option<String>,
    pub drawing_area: gtk::DrawingArea,
    pub puppet_scale: gtk::Scale,
}

#[derive(Debug)]
pub enum AppMsg {
    TogglePreview,
    Back,
    Press(Point),
    CursorMove(Point),
    CursorLeave,
    PuppetValue(f64),
    AvatarReload,
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::AvatarReload => AppMsg::AvatarReload,
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Preview, Overrides, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Expression Menu Preview"),
            add_css_class: "exmenu-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape || key == gtk::gdk::Key::BackSpace {
                        sender.input(AppMsg::Back);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_spacing: 8,
                set_margin_all: 12,

                gtk::Button {
                    #[watch]
                    set_label: if model.preview_enabled { "Disable preview" } else { "Enable preview" },
                    connect_clicked => AppMsg::TogglePreview,
                },

                gtk::Label {
                    set_label: "Enable the preview to drive the avatar's parameters from its menu.",
                    set_wrap: true,
                    #[watch]
                    set_visible: !model.preview_enabled,
                },

                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_halign: gtk::Align::Center,
                    add_css_class: "exmenu-drawing-area",
                    #[watch]
                    set_visible: model.preview_enabled,

                    add_controller = gtk::EventControllerMotion {
                        connect_motion[sender] => move |_, x, y| {
                            sender.input(AppMsg::CursorMove(Point::new(x, y)));
                        },
                        connect_leave[sender] => move |_| {
                            sender.input(AppMsg::CursorLeave);
                        },
                    },

                    add_controller = gtk::GestureClick {
                        set_button: gtk::gdk::BUTTON_PRIMARY,
                        connect_pressed[sender] => move |_, _, x, y| {
                            sender.input(AppMsg::Press(Point::new(x, y)));
                        }
                    }
                },

                gtk::Label {
                    #[watch]
                    set_label: model.puppet_label.as_deref().unwrap_or_default(),
                    #[watch]
                    set_visible: model.puppet_label.is_some(),
                },

                #[name = "puppet_scale"]
                gtk::Scale::with_range(gtk::Orientation::Horizontal, 0.0, 1.0, 0.01) {
                    set_draw_value: true,
                    #[watch]
                    set_visible: model.puppet_label.is_some(),
                    connect_value_changed[sender] => move |scale| {
                        sender.input(AppMsg::PuppetValue(scale.value()));
                    },
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (preview, overrides, rx) = init;

        theme::load_css();

        let model = AppModel {
            preview: Rc::new(RefCell::new(preview)),
            overrides,
            preview_enabled: false,
            puppet_label: None,
            drawing_area: gtk::DrawingArea::default(),
            puppet_scale: gtk::Scale::with_range(gtk::Orientation::Horizontal, 0.0, 1.0, 0.01),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();
        model.puppet_scale = widgets.puppet_scale.clone();
        model.resize_drawing_area();

        let preview_draw = model.preview.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = menu::draw(cr, &preview_draw.borrow(), &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::TogglePreview => {
                self.preview_enabled = self.preview.borrow_mut().toggle_preview();
                self.sync_puppet();
                self.drawing_area.queue_draw();
            }
            AppMsg::Back => {
                let activation = self.preview.borrow_mut().back();
                self.after_activation(activation);
            }
            AppMsg::Press(point) => {
                let activation = self.preview.borrow_mut().press(point);
                self.after_activation(activation);
            }
            AppMsg::CursorMove(point) => {
                if self.preview.borrow_mut().hover(Some(point)) {
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::CursorLeave => {
                if self.preview.borrow_mut().hover(None) {
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::PuppetValue(value) => {
                if self.preview.borrow_mut().set_puppet_value(value) {
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::AvatarReload => {
                self.preview.borrow_mut().reload_avatar();
                self.sync_puppet();
                self.drawing_area.queue_draw();
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    let new_config = self.overrides.apply(new_config);
                    self.apply_config(&new_config);
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}

impl AppModel {
    fn after_activation(&mut self, activation: Activation) {
        if activation.home_requested {
            log::debug!("Back pressed at the root menu");
        }
        if activation.should_redraw {
            self.sync_puppet();
            self.drawing_area.queue_draw();
        }
    }

    /// Mirrors the engaged puppet, if any, into the slider.
    fn sync_puppet(&mut self) {
        let puppet = self
            .preview
            .borrow()
            .puppet()
            .map(|p| (p.parameter.to_string(), p.value));

        let engaged = puppet.as_ref().map(|(name, _)| name.clone());
        if engaged != self.puppet_label {
            if let Some((_, value)) = &puppet {
                let before = self.puppet_scale.value();
                self.puppet_scale.set_value(*value as f64);
                let shown = self.puppet_scale.value();
                if shown != before {
                    self.preview.borrow_mut().expect_slider_echo(shown);
                }
            }
            self.puppet_label = engaged;
        }
    }

    fn resize_drawing_area(&self) {
        let size = self.preview.borrow().layout.radius * 2.0;
        self.drawing_area.set_content_width(size.ceil() as i32);
        self.drawing_area.set_content_height(size.ceil() as i32);
    }

    fn apply_config(&mut self, config: &Config) {
        if self.preview.borrow_mut().apply_config(config) {
            log::info!("Avatar path changed; restart to watch the new file");
        }
        self.preview_enabled = self.preview.borrow().session.is_preview_enabled();
        self.resize_drawing_area();
        self.sync_puppet();
        self.drawing_area.queue_draw();
        log::info!("Configuration reloaded");
    }
}
