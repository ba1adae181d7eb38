// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scripted feed of posts, each with a reaction picker.
//!
//! Every post is an anchor sharing one picker host. The script long-presses posts,
//! drags across the strip, and taps outside or on another post to dismiss,
//! playing the renderer's part by laying out the strip and completing transitions.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_reaction_demos --example feed`

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use kurbo::{Point, Rect, Size};
use understory_reaction::gesture::{AnchorBuilder, GestureMachine, GesturePhase};
use understory_reaction::hover::{HoverEvent, HoverTracker};
use understory_reaction::motion::{Choreography, MotionSignal, MotionTarget};
use understory_reaction::placement::AnchoredPositionProvider;
use understory_reaction::reaction::Reaction;
use understory_reaction::registry::PickerHost;
use understory_reaction::state::{Changes, PickerState};
use understory_reaction::types::{LayoutDirection, PointerEvent, PointerEventKind};

const WINDOW: Size = Size::new(360.0, 640.0);

fn reactions() -> Vec<Reaction> {
    ["Like", "Love", "Haha", "Wow", "Sad", "Angry"]
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            Reaction::builder()
                .key(name)
                .label_text(name)
                .image(i as u32)
                .build()
                .expect("label and icon are set")
        })
        .collect()
}

struct Post {
    title: &'static str,
    machine: GestureMachine,
    motion: Option<Choreography>,
    reacted: Rc<RefCell<Vec<Option<String>>>>,
}

impl Post {
    fn new(title: &'static str, host: &PickerHost, top: f64) -> Self {
        let reacted: Rc<RefCell<Vec<Option<String>>>> = Rc::default();
        let sink = reacted.clone();
        let mut state = PickerState::new(reactions(), None, move |r| {
            let label = r.and_then(Reaction::label_text).map(str::to_owned);
            log::info!("reacted: {label:?}");
            sink.borrow_mut().push(label);
        })
        .expect("reactions are not empty");
        state.set_anchor_bounds(Rect::new(0.0, top, WINDOW.width, top + 160.0));

        let mut haptics = HoverTracker::new();
        let _ = state.subscribe(Changes::HOVER, move |state, _| {
            for event in haptics.update(state.hovered_index()).events() {
                if let HoverEvent::Enter(i) = event
                    && state.properties().haptics_enabled
                {
                    log::info!("haptic tick on {:?}", state.reactions()[i].label_text());
                }
            }
        });

        let machine = AnchorBuilder::new(state.into_shared())
            .host(host.clone())
            .attach()
            .expect("host is set");
        Self {
            title,
            machine,
            motion: None,
            reacted,
        }
    }

    fn event(&mut self, kind: PointerEventKind, x: f64, y: f64, ms: u64) {
        let event = PointerEvent::touch(kind, Point::new(x, y), Duration::from_millis(ms));
        let outcome = self.machine.handle_event(event);
        log::debug!("{}: {kind:?} at ({x}, {y}) -> {outcome:?}", self.title);
        self.render();
    }

    fn advance(&mut self, ms: u64) {
        self.machine.advance(Duration::from_millis(ms));
        self.render();
    }

    /// Play the renderer: lay out a freshly shown picker and start transitions.
    fn render(&mut self) {
        let shared = self.machine.state().clone();
        let mut state = shared.borrow_mut();
        match (&mut self.motion, state.is_visible()) {
            (None, true) => {
                layout(&mut state);
                self.motion = Some(Choreography::enter(&state));
            }
            (Some(motion), false) if !motion.is_exiting() => {
                let _ = motion.exit(&state);
            }
            _ => {}
        }
    }

    /// Let every running transition finish, reporting item signals to the machine.
    fn settle(&mut self) {
        let Some(mut motion) = self.motion.take() else {
            return;
        };
        let _ = motion.complete_all(MotionTarget::Container);
        let len = self.machine.state().borrow().reactions().len();
        for i in 0..len {
            match motion.complete_all(MotionTarget::Item(i)) {
                Some(MotionSignal::Entered(i)) => {
                    let _ = self.machine.item_entered(i);
                }
                Some(MotionSignal::Exited(i)) => {
                    let _ = self.machine.item_exited(i);
                }
                None => {}
            }
        }
        if !motion.is_exiting() || self.machine.phase() != GesturePhase::Idle {
            self.motion = Some(motion);
        }
        self.render();
    }
}

/// Measure and place the strip, then report every item's bounds.
fn layout(state: &mut PickerState) {
    let props = *state.properties();
    let n = state.reactions().len() as f64;
    let width = 2.0 * props.content_padding
        + n * props.idle_size
        + (n - 1.0) * props.spacing_between_reactions;
    let size = Size::new(width, props.strip_height());
    let origin = state.place(
        &AnchoredPositionProvider::default(),
        WINDOW,
        LayoutDirection::Ltr,
        size,
    );
    state.set_picker_bounds(Rect::from_origin_size(origin, size));
    let bottom = origin.y + size.height - props.content_padding;
    for i in 0..state.reactions().len() {
        let x = origin.x
            + props.content_padding
            + i as f64 * (props.idle_size + props.spacing_between_reactions);
        state.update_item_bounds(i, Rect::new(x, bottom - props.idle_size, x + props.idle_size, bottom));
    }
    log::info!(
        "picker placed {:?} at {:?}",
        state.placement(),
        state.picker_bounds()
    );
}

/// Center of item `index` in root coordinates.
fn item_center(post: &Post, index: usize) -> Point {
    post.machine
        .state()
        .borrow()
        .item_bounds(index)
        .expect("item was laid out")
        .center()
}

fn main() {
    env_logger::init();

    let host = PickerHost::new();
    let mut posts = vec![
        Post::new("first post", &host, 40.0),
        Post::new("second post", &host, 220.0),
        Post::new("third post", &host, 400.0),
    ];

    // Long-press the second post, wait for the strip, drag onto "Wow", release.
    let post = &mut posts[1];
    post.event(PointerEventKind::Down, 120.0, 300.0, 0);
    post.advance(400);
    assert!(post.machine.state().borrow().is_visible());
    post.advance(420);
    post.settle();
    let wow = item_center(post, 3);
    post.event(PointerEventKind::Move, item_center(post, 1).x, wow.y, 500);
    post.event(PointerEventKind::Move, wow.x, wow.y, 560);
    assert_eq!(post.machine.state().borrow().hovered_index(), Some(3));
    post.event(PointerEventKind::Up, wow.x, wow.y, 600);
    post.settle();
    assert_eq!(post.machine.phase(), GesturePhase::Idle);
    assert_eq!(*post.reacted.borrow(), vec![Some("Wow".to_owned())]);
    println!("== {} ==\n  reacted {:?}", post.title, post.reacted.borrow());

    // The first post sits at the top of the window, so its strip flips below.
    let post = &mut posts[0];
    post.event(PointerEventKind::Down, 40.0, 60.0, 1000);
    post.advance(1420);
    post.settle();
    println!(
        "== {} ==\n  placement {:?}",
        post.title,
        post.machine.state().borrow().placement()
    );
    // A tap elsewhere in the feed dismisses without a reaction.
    assert!(host.dismiss_if_outside(Point::new(300.0, 600.0)));
    post.event(PointerEventKind::Up, 40.0, 60.0, 1500);
    post.settle();
    assert!(post.reacted.borrow().is_empty());

    // Pressing the third post while the first post's picker is open only dismisses it.
    post.event(PointerEventKind::Down, 40.0, 60.0, 2000);
    post.advance(2400);
    let (first, rest) = posts.split_at_mut(1);
    let third = &mut rest[1];
    third.event(PointerEventKind::Down, 200.0, 450.0, 2500);
    third.event(PointerEventKind::Up, 200.0, 450.0, 2550);
    assert!(!first[0].machine.state().borrow().is_visible());
    assert_eq!(third.machine.phase(), GesturePhase::Idle);
    assert!(!third.machine.state().borrow().is_visible());

    first[0].event(PointerEventKind::Up, 40.0, 60.0, 2600);
    first[0].settle();
    assert_eq!(first[0].machine.phase(), GesturePhase::Idle);
    assert!(host.current().is_none());

    // Now a long press opens the third post's picker; a quick release selects.
    third.event(PointerEventKind::Down, 200.0, 450.0, 3000);
    third.advance(3400);
    assert!(host.is_current(third.machine.state()));
    third.settle();
    let sad = item_center(third, 4);
    third.event(PointerEventKind::Up, sad.x, sad.y, 3410);
    third.settle();
    assert_eq!(*third.reacted.borrow(), vec![Some("Sad".to_owned())]);
    println!("== {} ==\n  reacted {:?}", third.title, third.reacted.borrow());
    assert!(host.current().is_none());
}
