//! Expansion of sparse waypoints into one crop per emitted frame.
//!
//! The walk visits the images in order. Whenever the current image is the
//! `image0` of the next waypoint, that waypoint becomes active: its crop (if
//! given) replaces the running crop, and per-frame deltas are computed so
//! that the running crop lands on `crop1` at `image1`. Every image is emitted
//! `n` times for the active waypoint's repeat count, the running crop moving
//! by one delta per emitted frame. Reaching `image1` settles the waypoint:
//! the crop snaps to `crop1` exactly and stays there until the next
//! waypoint.

use std::collections::VecDeque;

use serde::Serialize;
use tracing::{debug, warn};

use super::PanSpec;
use crate::crop::CropBox;
use crate::error::CroppanError;

/// One output frame: an image and the crop to apply to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Frame<'a> {
    pub image: &'a str,
    pub crop: CropBox,
}

/// Expands `pans` over `images`, yielding one [`Frame`] per emitted image.
///
/// Before the walk two waypoints are synthesized:
/// - if the first waypoint does not start at the first image, a hold of its
///   `crop0` at the first image is put in front of it
/// - a closing waypoint holding the last `crop1` is appended
///
/// # Errors
/// Fails up front with [`CroppanError::EmptyPanList`] if there are no
/// waypoints and with [`CroppanError::MissingInitialCrop`] if the first one
/// has no `crop0`. Errors found during the walk are yielded by the iterator,
/// which then stops.
#[tracing::instrument(skip_all, fields(images = images.len()))]
pub fn expand_pans<S, I>(images: &[S], pans: I) -> Result<Expansion<'_, S>, CroppanError>
where
    S: AsRef<str>,
    I: IntoIterator<Item = PanSpec>,
{
    let mut pending: VecDeque<PanSpec> = pans.into_iter().collect();

    let first = pending.front().ok_or(CroppanError::EmptyPanList)?;
    let Some(first_crop) = first.crop0() else {
        return Err(CroppanError::MissingInitialCrop {
            image: first.image0().map(str::to_string),
        });
    };

    if let Some(head) = images.first().map(S::as_ref) {
        if first.image0() != Some(head) {
            debug!(image = head, "pan does not start at the first image, holding its crop until then");
            pending.push_front(PanSpec::hold(head, Some(first_crop)));
        }
    }

    let closing_crop = pending.back().and_then(PanSpec::crop1);
    pending.push_back(PanSpec::new(None, closing_crop, None, None, None)?);

    Ok(Expansion {
        images,
        pending,
        active: None,
        state: PanState::default(),
        position: 0,
        left: 0,
        done: false,
    })
}

/// Iterator over the frames of an expansion. See [`expand_pans`].
#[derive(Debug)]
pub struct Expansion<'a, S> {
    images: &'a [S],
    pending: VecDeque<PanSpec>,
    active: Option<PanSpec>,
    state: PanState,
    /// Index of the image being emitted.
    position: usize,
    /// Frames still to emit for the image at `position`; 0 before it starts.
    left: u32,
    done: bool,
}

impl<'a, S: AsRef<str>> Expansion<'a, S> {
    /// Arms the next waypoint if it starts at `image`, then schedules the
    /// image's repeats.
    fn start_image(&mut self, image: &str) -> Result<(), CroppanError> {
        if self.pending.front().and_then(PanSpec::image0) == Some(image) {
            if let Some(pan) = self.pending.pop_front() {
                let span = self.images[self.position..]
                    .iter()
                    .position(|name| Some(name.as_ref()) == pan.image1());
                self.state.arm(&pan, span)?;
                debug!(
                    image0 = image,
                    image1 = pan.image1(),
                    n = pan.n(),
                    "armed pan"
                );
                self.active = Some(pan);
            }
        }
        self.left = self.state.repeats;
        Ok(())
    }

    fn finish(&mut self) {
        self.done = true;
        let unused = self.pending.iter().filter(|p| p.image0().is_some()).count();
        if unused > 0 {
            warn!(
                count = unused,
                next = self.pending.front().and_then(PanSpec::image0),
                "pan specs never reached; their start image is not in the image sequence (or is out of order)"
            );
        }
    }
}

impl<'a, S: AsRef<str>> Iterator for Expansion<'a, S> {
    type Item = Result<Frame<'a>, CroppanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let images = self.images;
        let Some(image) = images.get(self.position).map(S::as_ref) else {
            self.finish();
            return None;
        };

        if self.left == 0 {
            if let Err(e) = self.start_image(image) {
                self.done = true;
                return Some(Err(e));
            }
        }

        let crop = self.state.emit();
        self.left -= 1;

        if self.left == 0 {
            if let Some(pan) = self.active.as_ref().filter(|p| p.image1() == Some(image)) {
                self.state.settle(pan);
            }
            self.position += 1;
        }

        Some(Ok(Frame { image, crop }))
    }
}

/// Interpolation state carried from frame to frame.
#[derive(Clone, Copy, Debug)]
struct PanState {
    current: [f64; 4],
    deltas: [f64; 4],
    repeats: u32,
}

impl Default for PanState {
    fn default() -> Self {
        Self {
            current: [0.0; 4],
            deltas: [0.0; 4],
            repeats: 1,
        }
    }
}

impl PanState {
    /// Starts a waypoint. `span` is the offset of its `image1` from the
    /// current image, if `image1` is still ahead in the sequence.
    fn arm(&mut self, pan: &PanSpec, span: Option<usize>) -> Result<(), CroppanError> {
        self.repeats = pan.n();
        if let Some(crop0) = pan.crop0() {
            self.current = crop0.to_f64_array();
        }

        self.deltas = [0.0; 4];
        let Some(span) = span else {
            return Ok(());
        };

        let steps = (span as u64 + 1) * u64::from(pan.n());
        if steps > 1 {
            let target = pan
                .crop1()
                .ok_or_else(|| CroppanError::MissingTargetCrop {
                    image: pan.image0().unwrap_or_default().to_string(),
                })?
                .to_f64_array();
            let increments = (steps - 1) as f64;
            for (delta, (to, from)) in self.deltas.iter_mut().zip(target.iter().zip(self.current)) {
                *delta = (to - from) / increments;
            }
        }
        Ok(())
    }

    /// Returns the rounded current crop and advances by one delta.
    fn emit(&mut self) -> CropBox {
        let crop = CropBox::from_f64_rounded(self.current);
        for (value, delta) in self.current.iter_mut().zip(self.deltas) {
            *value += delta;
        }
        crop
    }

    /// Stops at the waypoint's target. `emit` has already stepped one delta
    /// past it, so the crop is reset to the exact target.
    fn settle(&mut self, pan: &PanSpec) {
        self.deltas = [0.0; 4];
        self.repeats = 1;
        if let Some(crop1) = pan.crop1() {
            self.current = crop1.to_f64_array();
        }
    }
}
