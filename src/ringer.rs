use std::{
    collections::HashMap,
    sync::mpsc::{self, Receiver, Sender},
    thread,
};

use log::{error, info};
use rodio::{source::SineWave, Sink, Source};

use crate::{
    alarm::NotificationId,
    communication::{Message, MessageType},
};

const TONE_HZ: f32 = 880.0;

/// spawns the thread that plays the default alarm tone,
/// `volume` is in percent
#[must_use]
pub fn spawn(volume: f32) -> Sender<Message> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || ring(&rx, volume));
    tx
}

fn ring(rx: &Receiver<Message>, volume: f32) {
    let stream = match rodio::OutputStreamBuilder::open_default_stream() {
        Ok(stream) => Some(stream),
        Err(e) => {
            error!("couldn't open audio output, alarms will be silent: {e}");
            None
        }
    };
    let mut ringing: HashMap<NotificationId, Sink> = HashMap::new();
    // returns once every sender is gone
    for Message {
        kind,
        notification_id,
    } in rx.iter()
    {
        match kind {
            MessageType::Delivered(content) if content.sound => {
                let Some(stream) = &stream else { continue };
                info!("ringing {notification_id}");
                let sink = Sink::connect_new(stream.mixer());
                sink.set_volume(volume.clamp(0.0, 100.0) / 100.0);
                sink.append(SineWave::new(TONE_HZ).amplify(0.3));
                sink.play();
                // a second delivery of the same alarm replaces the first tone
                if let Some(old) = ringing.insert(notification_id, sink) {
                    old.stop();
                }
            }
            MessageType::Delivered(_) => {}
            MessageType::Dismissed => {
                if let Some(sink) = ringing.remove(&notification_id) {
                    info!("stopped ringing {notification_id}");
                    sink.stop();
                }
            }
        }
    }
}
