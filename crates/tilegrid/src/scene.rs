//! Scene files: an initial workspace plus a script of edits to replay.
//!
//! A scene is a TOML document:
//!
//! ```toml
//! [container]
//! width = 1280
//! height = 720
//!
//! [[boxes]]
//! title = "Quotes"
//! stack = [0.0, 0.0, 0.5, 1.0]
//!
//! [[boxes]]
//! title = "Chart"
//! stack = [0.5, 0.0, 1.0, 1.0]
//!
//! [[actions]]
//! kind = "drag"
//! from = [640, 360]
//! via = [[720, 360]]
//! to = [800, 360]
//! ```
//!
//! Boxes are referred to by their position: scene boxes first, in file
//! order, followed by boxes created by `add` actions.

use std::ops::Range;

use log::{debug, trace};
use serde::Deserialize;
use toml::Spanned;

use tilegrid_core::{
    bound::RectBound,
    geometry::{Point, StackRect},
};

use crate::{
    TilegridError,
    workspace::{BoxId, Workspace},
};

/// Container size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContainerSpec {
    width: i32,
    height: i32,
}

impl Default for ContainerSpec {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

impl ContainerSpec {
    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }
}

/// A box present when the scene starts.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BoxSpec {
    #[serde(default)]
    title: Option<String>,
    stack: Spanned<StackRect>,
    #[serde(default)]
    wide: bool,
}

impl BoxSpec {
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn stack(&self) -> StackRect {
        *self.stack.get_ref()
    }

    pub fn is_wide(&self) -> bool {
        self.wide
    }
}

/// Reference to a box by its scene index, with the span it was written at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxRef {
    index: usize,
    span: Range<usize>,
}

impl BoxRef {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

/// A workspace edit, replayed in file order.
///
/// Points are screen pixels written as `[x, y]`.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Adds a box; without `stack` it covers the whole unit rectangle.
    Add {
        title: Option<String>,
        stack: Option<StackRect>,
    },
    Close { target: BoxRef },
    /// Moves a box so its top-left corner lands at `to`.
    Move { target: BoxRef, to: Point },
    Resize {
        target: BoxRef,
        bound: RectBound,
        to: Point,
    },
    /// A full pointer drag: press at `from`, pass through `via`, release at `to`.
    Drag {
        from: Point,
        via: Vec<Point>,
        to: Point,
    },
    Container { width: i32, height: i32 },
    Wide { target: BoxRef },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ActionKind {
    Add,
    Close,
    Move,
    Resize,
    Drag,
    Container,
    Wide,
}

impl ActionKind {
    fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Close => "close",
            Self::Move => "move",
            Self::Resize => "resize",
            Self::Drag => "drag",
            Self::Container => "container",
            Self::Wide => "wide",
        }
    }
}

/// An `[[actions]]` table as written; which fields are required depends on
/// `kind`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAction {
    kind: Spanned<ActionKind>,
    title: Option<String>,
    stack: Option<Spanned<StackRect>>,
    #[serde(rename = "box")]
    target: Option<Spanned<usize>>,
    bound: Option<RectBound>,
    from: Option<Point>,
    #[serde(default)]
    via: Vec<Point>,
    to: Option<Point>,
    width: Option<i32>,
    height: Option<i32>,
}

impl RawAction {
    fn into_action(self, source: &str) -> Result<Action, TilegridError> {
        let kind = *self.kind.get_ref();
        let kind_span = self.kind.span();
        let missing = |field: &str| {
            TilegridError::new_scene_error(
                format!("`{}` action needs `{field}`", kind.name()),
                source,
                Some(kind_span.clone()),
            )
        };

        if let Some(stack) = &self.stack {
            check_stack(stack, source)?;
        }
        let target = self.target.map(|target| BoxRef {
            index: *target.get_ref(),
            span: target.span(),
        });

        let action = match kind {
            ActionKind::Add => Action::Add {
                title: self.title,
                stack: self.stack.map(|stack| *stack.get_ref()),
            },
            ActionKind::Close => Action::Close {
                target: target.ok_or_else(|| missing("box"))?,
            },
            ActionKind::Move => Action::Move {
                target: target.ok_or_else(|| missing("box"))?,
                to: self.to.ok_or_else(|| missing("to"))?,
            },
            ActionKind::Resize => Action::Resize {
                target: target.ok_or_else(|| missing("box"))?,
                bound: self.bound.ok_or_else(|| missing("bound"))?,
                to: self.to.ok_or_else(|| missing("to"))?,
            },
            ActionKind::Drag => Action::Drag {
                from: self.from.ok_or_else(|| missing("from"))?,
                via: self.via,
                to: self.to.ok_or_else(|| missing("to"))?,
            },
            ActionKind::Container => Action::Container {
                width: self.width.ok_or_else(|| missing("width"))?,
                height: self.height.ok_or_else(|| missing("height"))?,
            },
            ActionKind::Wide => Action::Wide {
                target: target.ok_or_else(|| missing("box"))?,
            },
        };
        Ok(action)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SceneFile {
    #[serde(default)]
    container: ContainerSpec,
    #[serde(default)]
    boxes: Vec<BoxSpec>,
    #[serde(default)]
    actions: Vec<RawAction>,
}

fn check_stack(stack: &Spanned<StackRect>, source: &str) -> Result<(), TilegridError> {
    let rect = stack.get_ref();
    if rect.horizontal().is_valid() && rect.vertical().is_valid() {
        Ok(())
    } else {
        Err(TilegridError::new_scene_error(
            "stack rectangle must be finite with left < right and top < bottom",
            source,
            Some(stack.span()),
        ))
    }
}

/// A parsed scene, keeping its source text for error reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    source: String,
    container: ContainerSpec,
    boxes: Vec<BoxSpec>,
    actions: Vec<Action>,
}

impl Scene {
    /// Parses a scene from TOML source.
    ///
    /// # Errors
    ///
    /// Returns [`TilegridError::Scene`] with the offending span when the
    /// TOML is malformed, a field has the wrong shape, or a stack rectangle
    /// is empty or not finite.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tilegrid::scene::Scene;
    /// let scene = Scene::from_toml("[[boxes]]\nstack = [0.0, 0.0, 1.0, 1.0]").unwrap();
    /// assert_eq!(scene.boxes().len(), 1);
    /// assert_eq!(scene.container().width(), 1280);
    ///
    /// assert!(Scene::from_toml("[[boxes]]\nstack = [1.0, 0.0, 0.0, 1.0]").is_err());
    /// ```
    pub fn from_toml(source: &str) -> Result<Self, TilegridError> {
        let file: SceneFile = toml::from_str(source).map_err(|err| {
            TilegridError::new_scene_error(err.message(), source, err.span())
        })?;

        for spec in &file.boxes {
            check_stack(&spec.stack, source)?;
        }
        let actions = file
            .actions
            .into_iter()
            .map(|raw| raw.into_action(source))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            boxes = file.boxes.len(),
            actions = actions.len();
            "Scene parsed"
        );

        Ok(Self {
            source: source.to_string(),
            container: file.container,
            boxes: file.boxes,
            actions,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn container(&self) -> ContainerSpec {
        self.container
    }

    pub fn boxes(&self) -> &[BoxSpec] {
        &self.boxes
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Populates `workspace` with the scene boxes and replays every action.
    ///
    /// Returns the ids of all boxes ever created, indexed the way the scene
    /// refers to them.
    ///
    /// # Errors
    ///
    /// Returns [`TilegridError::Scene`] when an action refers to a box that
    /// does not exist or was already closed.
    pub fn replay(&self, workspace: &mut Workspace) -> Result<Vec<BoxId>, TilegridError> {
        let mut ids = Vec::with_capacity(self.boxes.len());
        for (index, spec) in self.boxes.iter().enumerate() {
            let id = workspace.insert_box(spec.stack());
            workspace.set_title(id, default_title(spec.title(), index))?;
            if spec.wide {
                workspace.toggle_wide_mode(id)?;
            }
            ids.push(id);
        }

        for action in &self.actions {
            trace!(action:?; "Replaying action");
            match action {
                Action::Add { title, stack } => {
                    let id = workspace.insert_box(stack.unwrap_or_else(StackRect::unit));
                    workspace.set_title(id, default_title(title.as_deref(), ids.len()))?;
                    ids.push(id);
                }
                Action::Close { target } => {
                    let id = self.resolve(target, &ids, workspace)?;
                    workspace.close_box(id)?;
                }
                Action::Move { target, to } => {
                    let id = self.resolve(target, &ids, workspace)?;
                    workspace.move_box(id, *to)?;
                }
                Action::Resize { target, bound, to } => {
                    let id = self.resolve(target, &ids, workspace)?;
                    workspace.resize_box(id, *bound, *to)?;
                }
                Action::Drag { from, via, to } => {
                    if workspace.begin_drag(*from).is_some() {
                        for point in via.iter().chain(std::iter::once(to)) {
                            workspace.drag_to(*point);
                        }
                    }
                    workspace.end_drag();
                }
                Action::Container { width, height } => {
                    workspace.resize_container(*width, *height);
                }
                Action::Wide { target } => {
                    let id = self.resolve(target, &ids, workspace)?;
                    workspace.toggle_wide_mode(id)?;
                }
            }
        }

        Ok(ids)
    }

    fn resolve(
        &self,
        target: &BoxRef,
        ids: &[BoxId],
        workspace: &Workspace,
    ) -> Result<BoxId, TilegridError> {
        let error = |message: String| {
            TilegridError::new_scene_error(message, self.source.as_str(), Some(target.span()))
        };
        let id = ids
            .get(target.index)
            .copied()
            .ok_or_else(|| error(format!("no box with index {}", target.index)))?;
        if workspace.get(id).is_none() {
            return Err(error(format!("box {} was already closed", target.index)));
        }
        Ok(id)
    }
}

fn default_title(title: Option<&str>, index: usize) -> String {
    title.map_or_else(|| format!("Box {}", index + 1), str::to_string)
}
