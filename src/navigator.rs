//! Stack-based walk over the checklist tree.
//!
//! Each level is a sibling list plus a cursor. Entering a section pushes a
//! level; `Back` pops exactly one. Because a parent's cursor is left on the
//! section that was entered, the stack of cursors alone is the path from the
//! root to the focused list.

use anyhow::Result;

use crate::model::MenuNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    Up,
    Down,
    Activate,
    Back,
}

/// Whether navigation continues after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// What a front-end needs to draw the focused level.
#[derive(Debug, Clone, Copy)]
pub struct Level<'a> {
    pub items: &'a [MenuNode],
    pub cursor: usize,
    pub depth: usize,
}

pub struct Navigator<'a> {
    root: &'a mut [MenuNode],
    cursors: Vec<usize>,
}

impl<'a> Navigator<'a> {
    pub fn new(root: &'a mut [MenuNode]) -> Self {
        Self {
            root,
            cursors: vec![0],
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursors.last().copied().unwrap_or(0)
    }

    pub fn depth(&self) -> usize {
        self.cursors.len()
    }

    pub fn level(&self) -> Level<'_> {
        Level {
            items: self.focused(),
            cursor: self.cursor(),
            depth: self.depth(),
        }
    }

    /// Labels of the sections entered so far, outermost first.
    pub fn breadcrumb(&self) -> Vec<&str> {
        let mut labels = Vec::with_capacity(self.cursors.len().saturating_sub(1));
        let mut items: &[MenuNode] = &*self.root;
        for &index in &self.cursors[..self.cursors.len().saturating_sub(1)] {
            let node = &items[index];
            labels.push(node.label.as_str());
            items = &node.children;
        }
        labels
    }

    pub fn handle(&mut self, event: NavEvent) -> Flow {
        match event {
            NavEvent::Up => {
                if let Some(cursor) = self.cursors.last_mut() {
                    *cursor = cursor.saturating_sub(1);
                }
            }
            NavEvent::Down => {
                let len = self.focused().len();
                if let Some(cursor) = self.cursors.last_mut() {
                    if *cursor + 1 < len {
                        *cursor += 1;
                    }
                }
            }
            NavEvent::Activate => self.activate(),
            NavEvent::Back => {
                self.cursors.pop();
                if self.cursors.is_empty() {
                    return Flow::Exit;
                }
                tracing::trace!(depth = self.depth(), "left section");
            }
        }
        Flow::Continue
    }

    fn activate(&mut self) {
        if self.cursors.is_empty() {
            return;
        }
        let cursor = self.cursor();
        let Some(node) = self.focused_mut().get_mut(cursor) else {
            return;
        };

        if !node.is_section() {
            node.toggle();
            tracing::debug!(label = %node.label, checked = node.checked, "toggled item");
        } else if !node.children.is_empty() {
            tracing::trace!(label = %node.label, "entered section");
            self.cursors.push(0);
        }
    }

    fn focused(&self) -> &[MenuNode] {
        let mut items: &[MenuNode] = &*self.root;
        for &index in &self.cursors[..self.cursors.len().saturating_sub(1)] {
            items = &items[index].children;
        }
        items
    }

    fn focused_mut(&mut self) -> &mut [MenuNode] {
        let depth = self.cursors.len().saturating_sub(1);
        let mut items: &mut [MenuNode] = &mut *self.root;
        for &index in &self.cursors[..depth] {
            items = &mut items[index].children;
        }
        items
    }
}

/// Drive a navigator until the root level is left or events run out.
///
/// `draw` is called with the focused level before every wait for input.
/// An exhausted event source (`None`) ends navigation like leaving every level.
pub fn run<E, D>(navigator: &mut Navigator<'_>, mut next_event: E, mut draw: D) -> Result<()>
where
    E: FnMut() -> Result<Option<NavEvent>>,
    D: FnMut(&Level<'_>, &[&str]) -> Result<()>,
{
    loop {
        draw(&navigator.level(), &navigator.breadcrumb())?;
        let Some(event) = next_event()? else {
            return Ok(());
        };
        if navigator.handle(event) == Flow::Exit {
            return Ok(());
        }
    }
}
