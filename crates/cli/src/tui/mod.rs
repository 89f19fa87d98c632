//! Interactive grid demo.
//!
//! Drives the interaction engine from real terminal events: crossterm mouse
//! clicks are resolved to cells through a per-frame hit-region index (the
//! demo's `CellContainer`), keystrokes run through the controller's
//! type-to-edit routing, and the status line mirrors coordinator state.

use std::cell::RefCell;
use std::io::stdout;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use rustc_hash::FxHashMap;
use tracing::{debug, warn};
use unicode_width::UnicodeWidthStr;

use editgrid_core::{cell_id::col_to_letters, CellCoords, CellId, FieldKind};
use editgrid_interact::{
    CellContainer, CellController, CellHost, ControllerOptions, DisplayMode, GridEvent, GridState,
    KeyInput, KeyRouting, Modifiers, PointerInput, QueryTool,
};

use crate::data::GridData;

const GUTTER_WIDTH: u16 = 5;
const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);

/// Per-frame hit-region index: cell identity -> screen rect.
#[derive(Default)]
struct HitIndex {
    generation: u64,
    regions: Vec<(CellId, Rect)>,
}

impl HitIndex {
    /// Start a fresh layout pass. Old query tools become stale.
    fn begin_rebuild(&mut self) {
        self.generation += 1;
        self.regions.clear();
    }

    fn insert(&mut self, id: CellId, rect: Rect) {
        self.regions.push((id, rect));
    }

    /// Reverse lookup: which cell is under this screen position?
    fn cell_at(&self, x: u16, y: u16) -> Option<CellId> {
        self.regions
            .iter()
            .find(|(_, r)| x >= r.x && x < r.x + r.width && y >= r.y && y < r.y + r.height)
            .map(|(id, _)| *id)
    }
}

impl CellContainer for HitIndex {
    type Handle = Rect;

    fn generation(&self) -> u64 {
        self.generation
    }

    fn handle_for(&self, id: CellId) -> Option<Rect> {
        self.regions.iter().find(|(rid, _)| *rid == id).map(|(_, r)| *r)
    }
}

/// Host request queued by a controller, applied after the handler returns.
enum HostRequest {
    FocusInput(CellId),
    SelectContents(CellId),
    Redispatch(CellId, String),
}

/// Terminal-side `CellHost`: focus is a tracked cell id, input effects are
/// queued and applied to the edit buffer by the app loop.
#[derive(Default)]
struct TermHost {
    focused: Option<CellId>,
    requests: Vec<HostRequest>,
}

impl TermHost {
    fn take_requests(&mut self) -> Vec<HostRequest> {
        std::mem::take(&mut self.requests)
    }
}

impl CellHost for TermHost {
    fn focus_container(&mut self, id: CellId) {
        self.focused = Some(id);
    }

    fn focus_input(&mut self, id: CellId) {
        self.focused = Some(id);
        self.requests.push(HostRequest::FocusInput(id));
    }

    fn select_input_contents(&mut self, id: CellId) {
        self.requests.push(HostRequest::SelectContents(id));
    }

    fn redispatch_key(&mut self, id: CellId, key: &KeyInput) {
        self.requests.push(HostRequest::Redispatch(id, key.key.clone()));
    }

    fn container_contains_focus(&self, id: CellId) -> bool {
        self.focused == Some(id)
    }
}

/// Coordinator + controllers + host, grouped so event handlers can borrow
/// them independently of the rest of the app.
struct Interaction {
    state: GridState,
    controllers: FxHashMap<CellCoords, CellController>,
    host: TermHost,
    options: ControllerOptions,
}

impl Interaction {
    fn controller(
        &mut self,
        coords: CellCoords,
        field: &str,
        kind: FieldKind,
    ) -> &mut CellController {
        let options = self.options;
        let ctrl = self
            .controllers
            .entry(coords)
            .or_insert_with(|| CellController::with_options(coords, field, kind, options));
        ctrl.sync_registration(&mut self.state);
        ctrl
    }

    fn mouse_down(
        &mut self,
        coords: CellCoords,
        field: &str,
        kind: FieldKind,
        input: &PointerInput,
    ) {
        let options = self.options;
        let ctrl = self
            .controllers
            .entry(coords)
            .or_insert_with(|| CellController::with_options(coords, field, kind, options));
        ctrl.sync_registration(&mut self.state);
        let gesture = ctrl.on_container_mouse_down(&mut self.state, &mut self.host, input);
        debug!(cell = %ctrl.id(), ?gesture, "mouse down");
    }

    fn key_down(
        &mut self,
        coords: CellCoords,
        field: &str,
        kind: FieldKind,
        input: &KeyInput,
    ) -> KeyRouting {
        let options = self.options;
        let ctrl = self
            .controllers
            .entry(coords)
            .or_insert_with(|| CellController::with_options(coords, field, kind, options));
        ctrl.sync_registration(&mut self.state);
        ctrl.on_container_key_down(&mut self.state, &mut self.host, input)
    }

    fn input_focus(&mut self, coords: CellCoords) {
        if let Some(ctrl) = self.controllers.get_mut(&coords) {
            ctrl.on_input_focus(&mut self.state);
        }
    }

    fn input_blur(&mut self, coords: CellCoords) {
        if let Some(ctrl) = self.controllers.get_mut(&coords) {
            ctrl.on_input_blur(&mut self.state);
        }
    }

    fn mode_of(&self, coords: CellCoords) -> DisplayMode {
        self.controllers
            .get(&coords)
            .map(|c| c.mode())
            .unwrap_or_default()
    }

    /// Keep container focus colocated with the anchor.
    fn sync_anchor_focus(&mut self) {
        let Some(anchor) = self.state.anchor() else {
            return;
        };
        if let Some(ctrl) = self.controllers.get(&anchor) {
            ctrl.sync_anchor_focus(&self.state, &mut self.host);
        }
    }
}

/// In-progress direct edit of one cell.
struct EditSession {
    coords: CellCoords,
    buffer: String,
    /// Existing content is selected; the next character replaces it.
    selected: bool,
}

struct DemoApp {
    data: GridData,
    interact: Interaction,
    hit: HitIndex,
    edit: Option<EditSession>,
    scroll_row: usize,
    scroll_col: usize,
    file_name: String,
    last_event: Rc<RefCell<Option<String>>>,
    last_click: Option<(CellCoords, Instant)>,
    should_quit: bool,
}

impl DemoApp {
    fn new(data: GridData, file_name: String, options: ControllerOptions) -> Self {
        let last_event: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));
        let sink = last_event.clone();
        let mut state = GridState::new();
        state.set_event_callback(Box::new(move |event| {
            *sink.borrow_mut() = Some(describe_event(&event));
        }));

        Self {
            data,
            interact: Interaction {
                state,
                controllers: FxHashMap::default(),
                host: TermHost::default(),
                options,
            },
            hit: HitIndex::default(),
            edit: None,
            scroll_row: 0,
            scroll_col: 0,
            file_name,
            last_event,
            last_click: None,
            should_quit: false,
        }
    }

    fn anchor(&self) -> CellCoords {
        self.interact.state.anchor().unwrap_or(CellCoords::new(0, 0))
    }

    // =========================================================================
    // Event handling
    // =========================================================================

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        if self.edit.is_some() {
            self.handle_edit_key(key);
            return;
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Up => self.move_anchor(-1, 0, key.modifiers),
            KeyCode::Down => self.move_anchor(1, 0, key.modifiers),
            KeyCode::Left => self.move_anchor(0, -1, key.modifiers),
            KeyCode::Right => self.move_anchor(0, 1, key.modifiers),
            KeyCode::Enter => self.activate_anchor(),
            KeyCode::Char(c) => self.route_char(c, key.modifiers),
            _ => {}
        }
        self.interact.sync_anchor_focus();
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.cancel_edit(),
            KeyCode::Enter => self.commit_edit(),
            KeyCode::Backspace => {
                if let Some(edit) = self.edit.as_mut() {
                    if edit.selected {
                        edit.buffer.clear();
                        edit.selected = false;
                    } else {
                        edit.buffer.pop();
                    }
                }
            }
            KeyCode::Char(c) => {
                if let Some(edit) = self.edit.as_mut() {
                    if edit.selected {
                        edit.buffer.clear();
                        edit.selected = false;
                    }
                    edit.buffer.push(c);
                }
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent) {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(id) = self.hit.cell_at(event.column, event.row) else {
                    return;
                };
                let coords = id.coords();

                // Clicking away from an active edit commits it first.
                if self.edit.as_ref().is_some_and(|e| e.coords != coords) {
                    self.commit_edit();
                }

                let click_count = match self.last_click {
                    Some((prev, at)) if prev == coords && at.elapsed() < DOUBLE_CLICK_WINDOW => 2,
                    _ => 1,
                };
                self.last_click = Some((coords, Instant::now()));

                let input = PointerInput {
                    click_count,
                    modifiers: convert_modifiers(event.modifiers),
                };
                let field = self.data.fields[coords.col].clone();
                let kind = self.data.kinds[coords.col];
                self.interact.mouse_down(coords, &field, kind, &input);
                self.apply_host_requests();
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(id) = self.hit.cell_at(event.column, event.row) {
                    self.interact.state.on_cell_mouse_over(id.coords());
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.interact.state.end_drag();
            }
            _ => {}
        }
        self.interact.sync_anchor_focus();
    }

    fn move_anchor(&mut self, drow: i32, dcol: i32, modifiers: KeyModifiers) {
        if self.data.num_rows() == 0 || self.data.num_cols() == 0 {
            return;
        }
        let extend = modifiers.contains(KeyModifiers::SHIFT);
        let from = if extend {
            self.interact.state.selection_end().unwrap_or(self.anchor())
        } else {
            self.anchor()
        };
        let row = (from.row as i32 + drow).clamp(0, self.data.num_rows() as i32 - 1) as usize;
        let col = (from.col as i32 + dcol).clamp(0, self.data.num_cols() as i32 - 1) as usize;
        let target = CellCoords::new(row, col);

        if extend {
            self.interact.state.set_range_end(target);
        } else {
            self.interact.state.set_single_range(target);
        }
        self.scroll_to_anchor_target(target);
    }

    /// Enter on the anchor: double-click analog for input cells, a value
    /// toggle for boolean cells.
    fn activate_anchor(&mut self) {
        let coords = self.anchor();
        let field = self.data.fields[coords.col].clone();
        let kind = self.data.kinds[coords.col];

        if kind == FieldKind::Boolean {
            let current = self.data.get(coords.row, coords.col).eq_ignore_ascii_case("true");
            let flipped = (!current).to_string();
            if self.interact.state.on_input_change(&field, &flipped).is_ok() {
                self.data.set(coords.row, coords.col, flipped);
            }
            return;
        }

        self.interact.mouse_down(coords, &field, kind, &PointerInput::double_click());
        self.apply_host_requests();
    }

    fn route_char(&mut self, c: char, modifiers: KeyModifiers) {
        let coords = self.anchor();
        let field = self.data.fields[coords.col].clone();
        let kind = self.data.kinds[coords.col];
        let input = KeyInput::new(c.to_string(), convert_modifiers(modifiers));

        let routing = self.interact.key_down(coords, &field, kind, &input);
        debug!(cell = %CellId::from(coords), key = %input.key, ?routing, "key down");
        if routing == KeyRouting::Forwarded {
            self.apply_host_requests();
        }
    }

    /// Apply queued host effects: input focus opens an edit session, content
    /// selection marks the buffer, re-dispatched keys land in the buffer.
    fn apply_host_requests(&mut self) {
        for request in self.interact.host.take_requests() {
            match request {
                HostRequest::FocusInput(id) => {
                    let coords = id.coords();
                    self.edit = Some(EditSession {
                        coords,
                        buffer: self.data.get(coords.row, coords.col).to_string(),
                        selected: false,
                    });
                    self.interact.input_focus(coords);
                }
                HostRequest::SelectContents(id) => {
                    if let Some(edit) = self.edit.as_mut() {
                        if edit.coords == id.coords() {
                            edit.selected = true;
                        }
                    }
                }
                HostRequest::Redispatch(id, key) => {
                    let Some(edit) = self.edit.as_mut() else { continue };
                    if edit.coords != id.coords() || key.chars().count() != 1 {
                        continue;
                    }
                    if edit.selected {
                        edit.buffer.clear();
                        edit.selected = false;
                    }
                    edit.buffer.push_str(&key);
                }
            }
        }
    }

    fn commit_edit(&mut self) {
        let Some(edit) = self.edit.take() else { return };
        let field = self.data.fields[edit.coords.col].clone();
        match self.interact.state.on_input_change(&field, &edit.buffer) {
            Ok(()) => self.data.set(edit.coords.row, edit.coords.col, edit.buffer),
            Err(err) => warn!(%err, "edit dropped"),
        }
        self.interact.input_blur(edit.coords);
        self.interact.host.focus_container(CellId::from(edit.coords));
    }

    fn cancel_edit(&mut self) {
        if let Some(edit) = self.edit.take() {
            self.interact.input_blur(edit.coords);
            self.interact.host.focus_container(CellId::from(edit.coords));
        }
    }

    // =========================================================================
    // Scrolling
    // =========================================================================

    /// Scroll so the anchor stays visible. The hit index doubles as the
    /// visibility oracle: a cell the last layout pass placed on screen
    /// resolves through the query tool, anything else needs a scroll.
    fn scroll_to_anchor_target(&mut self, target: CellCoords) {
        let visible = QueryTool::new(&self.hit).element_at(target).is_ok();
        if visible {
            return;
        }
        if target.row < self.scroll_row {
            self.scroll_row = target.row;
        } else {
            self.scroll_row = self.scroll_row.saturating_add(target.row.saturating_sub(self.last_visible_row()));
        }
        if target.col < self.scroll_col {
            self.scroll_col = target.col;
        } else if target.col > self.last_visible_col() {
            self.scroll_col += target.col - self.last_visible_col();
        }
    }

    fn last_visible_row(&self) -> usize {
        self.hit
            .regions
            .iter()
            .map(|(id, _)| id.row)
            .max()
            .unwrap_or(self.scroll_row)
    }

    fn last_visible_col(&self) -> usize {
        self.hit
            .regions
            .iter()
            .map(|(id, _)| id.col)
            .max()
            .unwrap_or(self.scroll_col)
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        if area.height < 4 {
            return;
        }
        let header_area = Rect::new(area.x, area.y, area.width, 1);
        let col_header_area = Rect::new(area.x, area.y + 1, area.width, 1);
        let grid_area = Rect::new(area.x, area.y + 2, area.width, area.height - 3);
        let footer_area = Rect::new(area.x, area.y + area.height - 1, area.width, 1);

        self.register_visible(grid_area);

        frame.render_widget(self.header_line(), header_area);
        frame.render_widget(self.column_header_line(), col_header_area);
        self.draw_grid(frame, grid_area);
        frame.render_widget(self.footer_line(), footer_area);
    }

    /// Mount pass: rebuild hit regions for the visible window and keep the
    /// visible cells' registrations in sync.
    fn register_visible(&mut self, grid_area: Rect) {
        self.hit.begin_rebuild();
        let visible_rows = grid_area.height as usize;

        for (i, row) in (self.scroll_row..self.data.num_rows()).take(visible_rows).enumerate() {
            let y = grid_area.y + i as u16;
            let mut x = grid_area.x + GUTTER_WIDTH;
            for col in self.scroll_col..self.data.num_cols() {
                let w = self.data.col_widths[col] as u16 + 1;
                if x + w > grid_area.x + grid_area.width {
                    break;
                }
                let coords = CellCoords::new(row, col);
                let field = self.data.fields[col].clone();
                let kind = self.data.kinds[col];
                let ctrl = self.interact.controller(coords, &field, kind);
                self.hit.insert(ctrl.id(), Rect::new(x, y, w, 1));
                x += w;
            }
        }
    }

    fn header_line(&self) -> Paragraph<'static> {
        let anchor_ref = CellId::from(self.anchor()).to_string();
        let range_note = match self.interact.state.range() {
            Some(r) if r.cell_count() > 1 => format!("  ({} cells)", r.cell_count()),
            _ => String::new(),
        };
        let line = Line::from(vec![
            Span::styled(
                format!(" {} ", anchor_ref),
                Style::default().add_modifier(Modifier::BOLD).fg(Color::Cyan),
            ),
            Span::raw(range_note),
            Span::raw("  "),
            Span::styled(self.file_name.clone(), Style::default().fg(Color::DarkGray)),
        ]);
        Paragraph::new(line)
    }

    fn column_header_line(&self) -> Paragraph<'static> {
        let anchor_col = self.anchor().col;
        let mut spans = vec![Span::raw(" ".repeat(GUTTER_WIDTH as usize))];
        for col in self.scroll_col..self.data.num_cols() {
            let w = self.data.col_widths[col];
            let letters = col_to_letters(col);
            let label = format!("{} ({})", self.data.fields[col], letters);
            let style = if col == anchor_col {
                Style::default().add_modifier(Modifier::BOLD).fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(format!("{} ", pad(&label, w)), style));
        }
        Paragraph::new(Line::from(spans))
    }

    fn draw_grid(&self, frame: &mut Frame, area: Rect) {
        let mut lines = Vec::new();
        let visible_rows = area.height as usize;

        for row in (self.scroll_row..self.data.num_rows()).take(visible_rows) {
            let mut spans = vec![Span::styled(
                format!("{:>width$} ", row + 1, width = GUTTER_WIDTH as usize - 1),
                Style::default().fg(Color::DarkGray),
            )];
            let mut x = GUTTER_WIDTH;
            for col in self.scroll_col..self.data.num_cols() {
                let w = self.data.col_widths[col];
                if x + w as u16 + 1 > area.width {
                    break;
                }
                x += w as u16 + 1;
                spans.push(self.cell_span(CellCoords::new(row, col), w));
            }
            lines.push(Line::from(spans));
        }
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn cell_span(&self, coords: CellCoords, width: usize) -> Span<'static> {
        let kind = self.data.kinds[coords.col];
        let state = &self.interact.state;
        let is_anchor = state.anchor() == Some(coords);
        let is_drag = state.is_cell_drag_selected(coords);
        let is_selected = state.is_cell_selected(coords);
        let editing_here = self.edit.as_ref().is_some_and(|e| e.coords == coords);

        let text = if editing_here {
            let edit = self.edit.as_ref().map(|e| e.buffer.as_str()).unwrap_or("");
            format!("{}▏", edit)
        } else {
            match kind {
                FieldKind::Boolean => {
                    let on = self.data.get(coords.row, coords.col).eq_ignore_ascii_case("true");
                    format!("[{}]", if on { "x" } else { " " })
                }
                _ => self.data.get(coords.row, coords.col).to_string(),
            }
        };

        let mut style = Style::default();
        if is_selected {
            style = style.bg(Color::Rgb(40, 50, 70));
        }
        if is_drag {
            style = style.bg(Color::Rgb(50, 65, 95));
        }
        if is_anchor {
            style = style.add_modifier(Modifier::BOLD).bg(Color::Rgb(60, 80, 120));
        }
        if editing_here {
            let selected = self.edit.as_ref().is_some_and(|e| e.selected);
            style = style.fg(Color::Yellow);
            if selected {
                style = style.add_modifier(Modifier::REVERSED);
            }
        }
        Span::styled(format!("{} ", pad(&text, width)), style)
    }

    fn footer_line(&self) -> Paragraph<'static> {
        let mode = if self.edit.is_some() {
            "-- EDIT --"
        } else if self.interact.state.is_selecting() {
            "-- DRAG --"
        } else {
            "-- SELECT --"
        };
        let anchor_mode = self.interact.mode_of(self.anchor());
        let overlay_note = match anchor_mode {
            DisplayMode::Overlay => "overlay",
            DisplayMode::DirectEdit => "input",
        };
        let event_note = self
            .last_event
            .borrow()
            .clone()
            .unwrap_or_else(|| "ready".to_string());

        let line = Line::from(vec![
            Span::styled(mode.to_string(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!("  [{}]  {}", overlay_note, event_note)),
            Span::styled(
                "  arrows: move | shift: extend | enter/double-click: edit | type: edit | esc: quit",
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        Paragraph::new(line)
    }
}

fn describe_event(event: &GridEvent) -> String {
    match event {
        GridEvent::SelectionChanged { anchor, range } => {
            if range.is_single() {
                format!("selected {}", CellId::from(*anchor))
            } else {
                format!("range {} cells from {}", range.cell_count(), CellId::from(*anchor))
            }
        }
        GridEvent::EditingChanged(editing) => {
            format!("editing: {}", if *editing { "on" } else { "off" })
        }
        GridEvent::CellEdited { field, value } => format!("{} = {:?}", field, value),
        GridEvent::RegistrationReplaced { coords } => {
            format!("re-registered {}", CellId::from(*coords))
        }
    }
}

fn convert_modifiers(m: KeyModifiers) -> Modifiers {
    Modifiers {
        shift: m.contains(KeyModifiers::SHIFT),
        control: m.contains(KeyModifiers::CONTROL),
        alt: m.contains(KeyModifiers::ALT),
        platform: m.contains(KeyModifiers::SUPER),
    }
}

fn pad(s: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = UnicodeWidthStr::width(ch.to_string().as_str());
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

/// Run the interactive demo grid.
pub fn run(data: GridData, file_name: String, options: ControllerOptions) -> Result<(), String> {
    let mut app = DemoApp::new(data, file_name, options);
    app.interact.state.set_single_range(CellCoords::new(0, 0));

    terminal::enable_raw_mode().map_err(|e| format!("failed to enable raw mode: {}", e))?;
    stdout()
        .execute(EnterAlternateScreen)
        .and_then(|s| s.execute(EnableMouseCapture))
        .map_err(|e| format!("failed to enter alternate screen: {}", e))?;

    struct Cleanup;
    impl Drop for Cleanup {
        fn drop(&mut self) {
            let _ = stdout().execute(DisableMouseCapture);
            let _ = stdout().execute(LeaveAlternateScreen);
            let _ = terminal::disable_raw_mode();
        }
    }
    let _cleanup = Cleanup;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal =
        Terminal::new(backend).map_err(|e| format!("failed to create terminal: {}", e))?;

    loop {
        terminal
            .draw(|frame| app.draw(frame))
            .map_err(|e| format!("draw error: {}", e))?;

        if event::poll(Duration::from_millis(100)).map_err(|e| format!("event poll error: {}", e))? {
            match event::read().map_err(|e| format!("event read error: {}", e))? {
                Event::Key(key) => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_app() -> DemoApp {
        let mut app = DemoApp::new(
            GridData::sample(),
            "sample".to_string(),
            ControllerOptions::default(),
        );
        app.interact.state.set_single_range(CellCoords::new(0, 0));
        // Simulate one layout pass over a roomy area.
        app.register_visible(Rect::new(0, 2, 120, 20));
        app
    }

    fn click_at(app: &mut DemoApp, coords: CellCoords, modifiers: Modifiers, count: u32) {
        let field = app.data.fields[coords.col].clone();
        let kind = app.data.kinds[coords.col];
        let input = PointerInput { click_count: count, modifiers };
        app.interact.mouse_down(coords, &field, kind, &input);
        app.apply_host_requests();
    }

    #[test]
    fn test_hit_index_resolves_cells() {
        let app = sample_app();
        let tool = QueryTool::new(&app.hit);
        let rect = tool.element_at(CellCoords::new(0, 0)).unwrap();
        assert_eq!(app.hit.cell_at(rect.x, rect.y), Some(CellId::new(0, 0)));
    }

    #[test]
    fn test_click_then_type_edits_text_cell() {
        let mut app = sample_app();
        click_at(&mut app, CellCoords::new(1, 0), Modifiers::NONE, 1);
        app.interact.state.end_drag();

        app.route_char('x', KeyModifiers::NONE);
        let edit = app.edit.as_ref().expect("type-to-edit opens a session");
        // Existing text was selected, so the forwarded char replaced it.
        assert_eq!(edit.buffer, "x");

        app.commit_edit();
        assert_eq!(app.data.get(1, 0), "x");
        assert!(app.edit.is_none());
        assert!(!app.interact.state.is_editing());
    }

    #[test]
    fn test_digit_appends_on_number_cell() {
        let mut app = sample_app();
        click_at(&mut app, CellCoords::new(0, 2), Modifiers::NONE, 1);

        app.route_char('5', KeyModifiers::NONE);
        let edit = app.edit.as_ref().expect("digit forwards on number cell");
        // Number inputs keep their content; the digit appends.
        assert_eq!(edit.buffer, "125");

        app.cancel_edit();
        assert_eq!(app.data.get(0, 2), "12");
    }

    #[test]
    fn test_letters_ignored_on_select_cell() {
        let mut app = sample_app();
        click_at(&mut app, CellCoords::new(0, 3), Modifiers::NONE, 1);
        app.route_char('x', KeyModifiers::NONE);
        assert!(app.edit.is_none());
    }

    #[test]
    fn test_double_click_opens_edit_with_content() {
        let mut app = sample_app();
        click_at(&mut app, CellCoords::new(2, 0), Modifiers::NONE, 1);
        click_at(&mut app, CellCoords::new(2, 0), Modifiers::NONE, 2);

        let edit = app.edit.as_ref().expect("double-click edits");
        assert_eq!(edit.buffer, "Alan Turing");
        assert!(!edit.selected);
    }

    #[test]
    fn test_click_elsewhere_commits_edit() {
        let mut app = sample_app();
        click_at(&mut app, CellCoords::new(0, 0), Modifiers::NONE, 1);
        app.route_char('Z', KeyModifiers::NONE);
        assert!(app.edit.is_some());

        // handle_mouse path commits before selecting the new cell.
        let rect = QueryTool::new(&app.hit).element_at(CellCoords::new(3, 0)).unwrap();
        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: rect.x,
            row: rect.y,
            modifiers: KeyModifiers::NONE,
        });

        assert!(app.edit.is_none());
        assert_eq!(app.data.get(0, 0), "Z");
        assert_eq!(app.interact.state.anchor(), Some(CellCoords::new(3, 0)));
    }

    #[test]
    fn test_boolean_enter_toggles() {
        let mut app = sample_app();
        click_at(&mut app, CellCoords::new(0, 4), Modifiers::NONE, 1);
        assert_eq!(app.data.get(0, 4), "true");
        app.activate_anchor();
        assert_eq!(app.data.get(0, 4), "false");
        app.activate_anchor();
        assert_eq!(app.data.get(0, 4), "true");
    }

    #[test]
    fn test_shift_arrow_extends_range() {
        let mut app = sample_app();
        click_at(&mut app, CellCoords::new(1, 1), Modifiers::NONE, 1);
        app.interact.state.end_drag();

        app.move_anchor(1, 0, KeyModifiers::SHIFT);
        app.move_anchor(1, 0, KeyModifiers::SHIFT);

        assert_eq!(app.interact.state.anchor(), Some(CellCoords::new(1, 1)));
        assert!(app.interact.state.is_cell_selected(CellCoords::new(3, 1)));
    }
}
