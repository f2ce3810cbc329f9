use crate::events::AppEvent;
use crate::host::{GtkHost, PixbufSource};
use crate::view;
use gdk_pixbuf::Pixbuf;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use ringslide::config;
use ringslide::{ResourceId, Slider, TouchKind};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub struct AppModel {
    pub slider: Rc<RefCell<Slider>>,
    pub thumb_image: Rc<RefCell<Option<Pixbuf>>>,
    pub config_path: PathBuf,
}

pub struct AppInit {
    pub slider: Slider,
    pub config_path: PathBuf,
    pub thumb: Option<ResourceId>,
    pub rx: async_channel::Receiver<AppEvent>,
}

#[derive(Debug)]
pub enum AppMsg {
    Resize(i32, i32),
    Touch(TouchKind, f64, f64),
    Nudge(i32),
    ConfigReload,
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
    type Init = AppInit;
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("ringslide"),
            set_default_width: 360,
            set_default_height: 360,

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    let step = match key {
                        gtk::gdk::Key::Right | gtk::gdk::Key::Up => 1,
                        gtk::gdk::Key::Left | gtk::gdk::Key::Down => -1,
                        _ => return glib::Propagation::Proceed,
                    };
                    sender.input(AppMsg::Nudge(step));
                    glib::Propagation::Stop
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,

                connect_resize[sender] => move |_, width, height| {
                    sender.input(AppMsg::Resize(width, height));
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let AppInit {
            slider,
            config_path,
            thumb,
            rx,
        } = init;

        let model = AppModel {
            slider: Rc::new(RefCell::new(slider)),
            thumb_image: Rc::new(RefCell::new(None)),
            config_path,
        };

        let widgets = view_output!();

        let drag = drag_gesture(&sender);
        widgets.drawing_area.add_controller(drag.clone());

        {
            let mut slider = model.slider.borrow_mut();
            slider.set_host(GtkHost::new(widgets.drawing_area.clone(), drag));
            slider.on_progress_changed(|value| log::info!("Progress changed to {}", value));
            slider.on_property_changed(|property| log::debug!("{} changed", property));

            if let Some(id) = &thumb {
                let config_dir = model.config_path.parent().unwrap_or(Path::new(""));
                let images = PixbufSource::new(config_dir);
                match slider.set_thumb_from_image_resource(&images, id) {
                    Ok(pixbuf) => *model.thumb_image.borrow_mut() = Some(pixbuf),
                    Err(e) => log::error!("Failed to set thumb: {}", e),
                }
            }
        }

        let slider_draw = model.slider.clone();
        let thumb_draw = model.thumb_image.clone();
        widgets
            .drawing_area
            .set_draw_func(move |_, cr, _, _| {
                let Some(params) = slider_draw.borrow().render_params() else {
                    return;
                };
                if let Err(e) = view::draw(cr, &params, thumb_draw.borrow().as_ref()) {
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
            AppMsg::Resize(width, height) => {
                self.slider
                    .borrow_mut()
                    .on_size_known(f64::from(width), f64::from(height));
            }
            AppMsg::Touch(kind, x, y) => {
                self.slider.borrow_mut().on_touch_event(kind, x, y);
            }
            AppMsg::Nudge(step) => {
                let mut slider = self.slider.borrow_mut();
                let target = slider.progress().saturating_add_signed(step);
                if let Err(e) = slider.set_progress(target) {
                    log::debug!("Ignoring nudge: {}", e);
                }
            }
            AppMsg::ConfigReload => self.reload_config(),
        }
    }
}

impl AppModel {
    fn reload_config(&self) {
        let mut next = match config::load(&self.config_path) {
            Ok(c) => c,
            Err(e) => {
                log::error!("Failed to reload config: {}", e);
                return;
            }
        };

        let mut slider = self.slider.borrow_mut();
        // an image thumb from the command line outlives config reloads
        if next.thumb.is_none() && self.thumb_image.borrow().is_some() {
            next.thumb = slider.thumb();
        }

        match slider.apply(next) {
            Ok(()) => log::info!("Configuration reloaded"),
            Err(e) => log::error!("Rejected reloaded config: {}", e),
        }
    }
}

/// Translates drag callbacks into slider touch events.
fn drag_gesture(sender: &ComponentSender<AppModel>) -> gtk::GestureDrag {
    let drag = gtk::GestureDrag::new();

    let s = sender.clone();
    drag.connect_drag_begin(move |_, x, y| {
        s.input(AppMsg::Touch(TouchKind::Down, x, y));
    });

    let s = sender.clone();
    drag.connect_drag_update(move |gesture, dx, dy| {
        if let Some((x, y)) = gesture.start_point() {
            s.input(AppMsg::Touch(TouchKind::Move, x + dx, y + dy));
        }
    });

    let s = sender.clone();
    drag.connect_drag_end(move |gesture, dx, dy| {
        let (x, y) = gesture.start_point().unwrap_or_default();
        s.input(AppMsg::Touch(TouchKind::Up, x + dx, y + dy));
    });

    let s = sender.clone();
    drag.connect_cancel(move |_, _| {
        s.input(AppMsg::Touch(TouchKind::Cancel, 0.0, 0.0));
    });

    drag
}
