//! Fetch-streaming SSE transport for the progress channel.
//!
//! # Design
//! - One connection per handle; the handle aborts the fetch and closes
//!   the channel core, so teardown is a single call.
//! - No reconnection: a transport error is a terminal failure and the
//!   user re-triggers the action.
//! - The channel core is closed before any terminal callback fires, so
//!   duplicate or late frames can never re-signal.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::console;
use js_sys::{Reflect, Uint8Array};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    AbortController, AbortSignal, ReadableStream, ReadableStreamDefaultReader, Request,
    RequestInit, RequestMode, Response, TextDecoder,
};
use yew::Callback;

use crate::services::stream::{ChannelSignal, ProgressChannel, SseParser};

/// Callbacks surfaced to the orchestrator.
#[derive(Clone)]
pub(crate) struct StreamCallbacks {
    /// Non-terminal progress update.
    pub on_progress: Callback<u8>,
    /// Stream completed at 100%. Fired at most once.
    pub on_complete: Callback<()>,
    /// Transport-level failure. Fired at most once.
    pub on_error: Callback<()>,
}

/// Live progress stream handle.
pub(crate) struct StreamHandle {
    controller: AbortController,
    channel: Rc<RefCell<ProgressChannel>>,
}

impl StreamHandle {
    /// Abort the connection and close the channel. Idempotent.
    pub(crate) fn close(&self) {
        self.channel.borrow_mut().close();
        self.controller.abort();
    }
}

/// Open the progress stream and pump events until a terminal outcome.
pub(crate) fn connect_progress_stream(
    url: String,
    callbacks: StreamCallbacks,
) -> Option<StreamHandle> {
    let controller = AbortController::new().ok()?;
    let signal = controller.signal();
    let channel = Rc::new(RefCell::new(ProgressChannel::new()));
    {
        let channel = channel.clone();
        let controller = controller.clone();
        yew::platform::spawn_local(async move {
            run_stream(url, signal, &controller, &channel, callbacks).await;
        });
    }
    Some(StreamHandle {
        controller,
        channel,
    })
}

async fn run_stream(
    url: String,
    signal: AbortSignal,
    controller: &AbortController,
    channel: &Rc<RefCell<ProgressChannel>>,
    callbacks: StreamCallbacks,
) {
    let mut reader = match open_reader(&url, &signal).await {
        Ok(reader) => reader,
        Err(err) => {
            console::error!("progress stream connect failed", err);
            fail(controller, channel, &callbacks);
            return;
        }
    };

    let Ok(decoder) = TextDecoder::new() else {
        fail(controller, channel, &callbacks);
        return;
    };
    let mut parser = SseParser::default();

    loop {
        if !channel.borrow().is_open() {
            // Closed by teardown or a terminal frame; stop reading.
            return;
        }
        match read_chunk(&mut reader).await {
            Ok(Some(bytes)) => {
                let Ok(text) = decoder.decode_with_js_u8_array(&bytes) else {
                    fail(controller, channel, &callbacks);
                    return;
                };
                for frame in parser.push(&text) {
                    let outcome = channel.borrow_mut().handle_frame(&frame.data);
                    match outcome {
                        Ok(Some(ChannelSignal::Progress(percent))) => {
                            callbacks.on_progress.emit(percent);
                        }
                        Ok(Some(ChannelSignal::Completed)) => {
                            // Channel already closed itself; stop the
                            // transport before signalling.
                            controller.abort();
                            callbacks.on_complete.emit(());
                            return;
                        }
                        Ok(None) => return,
                        Err(err) => {
                            console::warn!("dropping malformed progress frame", err.data);
                        }
                    }
                }
            }
            // A server-side end of stream without a terminal event is a
            // failure: the job's outcome is unknown.
            Ok(None) => {
                fail(controller, channel, &callbacks);
                return;
            }
            Err(err) => {
                console::error!("progress stream read failed", err);
                fail(controller, channel, &callbacks);
                return;
            }
        }
    }
}

fn fail(
    controller: &AbortController,
    channel: &Rc<RefCell<ProgressChannel>>,
    callbacks: &StreamCallbacks,
) {
    controller.abort();
    if channel.borrow_mut().fail() {
        callbacks.on_error.emit(());
    }
}

async fn open_reader(url: &str, signal: &AbortSignal) -> Result<ReadableStreamDefaultReader, String> {
    let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
    let init = RequestInit::new();
    init.set_method("GET");
    init.set_mode(RequestMode::Cors);
    init.set_signal(Some(signal));

    let request = Request::new_with_str_and_init(url, &init)
        .map_err(|err| format!("request build failed: {err:?}"))?;
    let resp = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|err| format!("fetch failed: {err:?}"))?;
    let response: Response = resp
        .dyn_into()
        .map_err(|_| "fetch returned no response".to_string())?;
    if !response.ok() {
        return Err(format!("http {}", response.status()));
    }
    let stream: ReadableStream = response
        .body()
        .ok_or_else(|| "response missing body".to_string())?;
    stream
        .get_reader()
        .dyn_into::<ReadableStreamDefaultReader>()
        .map_err(|_| "stream reader unavailable".to_string())
}

async fn read_chunk(
    reader: &mut ReadableStreamDefaultReader,
) -> Result<Option<Uint8Array>, String> {
    let chunk = JsFuture::from(reader.read())
        .await
        .map_err(|err| format!("read failed: {err:?}"))?;
    let done = Reflect::get(&chunk, &JsValue::from_str("done"))
        .map_err(|err| format!("chunk done lookup failed: {err:?}"))?
        .as_bool()
        .unwrap_or(false);
    if done {
        return Ok(None);
    }
    let value = Reflect::get(&chunk, &JsValue::from_str("value"))
        .map_err(|err| format!("chunk value lookup failed: {err:?}"))?;
    Ok(Some(Uint8Array::new(&value)))
}
