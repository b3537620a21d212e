mod frame_surface;
pub use frame_surface::{font_family, FrameSurface};

mod timeline_canvas;
pub use timeline_canvas::{TimelineCanvas, TimelineMessage};

use crate::timeline_back::{
    format_timecode, Color, Config, Key, Media, Mode, PlaybackClock, TimeAxis, Timeline,
    TimelineError,
};
use anyhow::Context as _;
use iced::{
    event,
    font::Family,
    keyboard,
    widget::{button, canvas, column, pick_list, row, slider, text},
    window::{frames, resize_events, Id},
    Alignment::Center,
    Element, Event, Length, Size, Subscription, Task,
};
use log::info;
use std::{path::PathBuf, time::Instant};
use strum::VariantArray as _;

/// length of the demo media, in seconds
const DURATION: f64 = 30.0;

/// space around the window contents
const PADDING: f32 = 20.0;

const DEMO_PERIODS: [(f64, f64, &str, usize, &str); 4] = [
    (5.0, 12.0, "#7A1631", 1, "London"),
    (7.0, 13.0, "#CF423C", 2, "Oxford"),
    (12.0, 25.0, "#7A1631", 3, "Toronto"),
    (23.0, 28.0, "#CF423C", 1, "San Francisco"),
];

/// opens the player on the config at `path`, or on the demo layout
pub fn run(path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = match path {
        Some(path) => Config::read(&path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Player::demo_config(),
    };
    let player = Player::new(config)?;

    iced::application("Media Timeline", Player::update, Player::view)
        .subscription(Player::subscription)
        .antialiasing(true)
        .run_with(move || (player, Task::none()))?;

    Ok(())
}

#[derive(Debug)]
pub struct Player {
    timeline: Timeline<PlaybackClock>,
    family: Family,
}

#[derive(Clone, Copy, Debug)]
pub enum Message {
    Timeline(TimelineMessage),
    TogglePlay,
    Stop,
    Tick(Instant),
    Resized((Id, Size)),
    ZoomChanged(f32),
    ScrollChanged(f32),
    ModeChanged(Mode),
    Key(Key),
}

impl Player {
    /// the layout the player opens with when no config file is given
    pub fn demo_config() -> Config {
        Config {
            height: 300.0,
            width: 750.0,
            number_of_tracks: 7,
            focus_fill: Color::from_rgb(0x33, 0x33, 0x33),
            ..Config::default()
        }
    }

    pub fn new(config: Config) -> Result<Self, TimelineError> {
        let family = font_family(&config.font.family);
        let mut timeline = Timeline::new(config)?;
        let tracks = timeline.config().number_of_tracks;

        for (time_in, time_out, color, track, label) in DEMO_PERIODS {
            timeline.add_period(
                time_in,
                time_out,
                color.parse()?,
                track.min(tracks),
                Some(label),
            )?;
        }

        timeline.attach(PlaybackClock::new(DURATION))?;

        Ok(Self { timeline, family })
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::Timeline(TimelineMessage::Pointer(event, width)) => {
                let width = f64::from(width);
                if (width - self.timeline.config().width).abs() >= 1.0 {
                    self.timeline.resize(width);
                }
                self.timeline.handle_pointer(event);
            }
            Message::TogglePlay => {
                if let Some(media) = self.timeline.media_mut() {
                    if media.is_playing() {
                        media.pause();
                    } else {
                        media.play();
                    }
                }
                self.timeline.on_time_update();
            }
            Message::Stop => {
                if let Some(media) = self.timeline.media_mut() {
                    media.stop();
                }
                self.timeline.on_time_update();
            }
            Message::Tick(now) => {
                if self
                    .timeline
                    .media_mut()
                    .is_some_and(|media| media.advance(now))
                {
                    self.timeline.on_time_update();
                }
            }
            Message::Resized((_, size)) => {
                let width = f64::from(size.width - 2.0 * PADDING);
                if width > 0.0 {
                    self.timeline.resize(width);
                }
            }
            Message::ZoomChanged(zoom) => self.timeline.set_zoom(f64::from(zoom)),
            Message::ScrollChanged(scroll) => self.timeline.set_scroll(f64::from(scroll)),
            Message::ModeChanged(mode) => {
                info!("switched to {mode} mode");
                self.timeline.set_mode(mode);
            }
            Message::Key(key) => self.timeline.key_press(key),
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let playing = self.timeline.media().is_some_and(Media::is_playing);
        let axis = self.timeline.axis();
        let max_zoom = self.timeline.config().max_scale_factor as f32;
        let max_scroll = axis.map_or(0.0, TimeAxis::max_scroll) as f32;

        let mut controls = row![
            button(if playing { "Pause" } else { "Play" }).on_press(Message::TogglePlay),
            button("Stop").on_press(Message::Stop),
            text(format_timecode(self.timeline.current_time() as u32)),
        ]
        .spacing(10)
        .align_y(Center);

        if max_zoom > 1.0 {
            controls = controls.push(text("Zoom")).push(
                slider(
                    1.0..=max_zoom,
                    axis.map_or(1.0, TimeAxis::zoom) as f32,
                    Message::ZoomChanged,
                )
                .step(0.1)
                .width(150),
            );
        }

        if max_scroll > 0.0 {
            controls = controls.push(text("Scroll")).push(
                slider(
                    0.0..=max_scroll,
                    axis.map_or(0.0, TimeAxis::scroll) as f32,
                    Message::ScrollChanged,
                )
                .step(0.1)
                .width(150),
            );
        }

        controls = controls.push(pick_list(
            Mode::VARIANTS,
            Some(self.timeline.mode()),
            Message::ModeChanged,
        ));

        let timeline = Element::from(
            canvas(TimelineCanvas::new(&self.timeline, self.family))
                .width(Length::Fill)
                .height(self.timeline.config().height as f32),
        )
        .map(Message::Timeline);

        column![controls, timeline]
            .padding(PADDING)
            .spacing(20)
            .into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let keys = event::listen_with(|e, _, _| match e {
            Event::Keyboard(keyboard::Event::KeyPressed {
                key: keyboard::Key::Named(key),
                ..
            }) => match key {
                keyboard::key::Named::Space => Some(Message::TogglePlay),
                keyboard::key::Named::Delete | keyboard::key::Named::Backspace => {
                    Some(Message::Key(Key::Delete))
                }
                keyboard::key::Named::Escape => Some(Message::Key(Key::Escape)),
                _ => None,
            },
            _ => None,
        });

        let resizes = resize_events().map(Message::Resized);

        if self.timeline.media().is_some_and(Media::is_playing) {
            Subscription::batch([keys, resizes, frames().map(Message::Tick)])
        } else {
            Subscription::batch([keys, resizes])
        }
    }
}
