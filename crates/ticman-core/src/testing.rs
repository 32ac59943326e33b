use crate::command::{Action, Command, CommandInner};
use crate::model::Model;
use futures::future::BoxFuture;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::collections::VecDeque;

/// A headless test harness that drives a [`Model`] without a real terminal.
///
/// Synchronous commands ([`Command::message`]) are queued and flushed with
/// [`drain_messages`](TestProgram::drain_messages). Async commands
/// ([`Command::perform`]) are queued as well, in the order they were issued,
/// and only run when the test asks for it with
/// [`run_next_task`](TestProgram::run_next_task) or
/// [`settle`](TestProgram::settle). That makes "how many tasks are in flight
/// right now" an observable fact in tests.
///
/// # Example
///
/// ```rust,ignore
/// let mut prog = TestProgram::<App>::new(flags);
/// prog.send(Msg::Key(enter()));
/// assert_eq!(prog.pending_tasks(), 1);
/// prog.settle().await;
/// assert!(prog.model().is_done());
/// ```
pub struct TestProgram<M: Model> {
    model: M,
    pending_messages: VecDeque<M::Message>,
    pending_tasks: VecDeque<BoxFuture<'static, M::Message>>,
    quit_requested: bool,
}

impl<M: Model> TestProgram<M> {
    /// Create a test program by calling [`Model::init`] with the given flags.
    pub fn new(flags: M::Flags) -> Self {
        let (model, init_cmd) = M::init(flags);
        let mut program = Self {
            model,
            pending_messages: VecDeque::new(),
            pending_tasks: VecDeque::new(),
            quit_requested: false,
        };
        program.collect(init_cmd);
        program
    }

    /// Send a message, triggering a single update cycle.
    pub fn send(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.collect(cmd);
    }

    /// Process pending synchronous messages until none are left.
    pub fn drain_messages(&mut self) {
        while let Some(msg) = self.pending_messages.pop_front() {
            self.send(msg);
        }
    }

    /// Number of async tasks issued but not yet run.
    pub fn pending_tasks(&self) -> usize {
        self.pending_tasks.len()
    }

    /// Run the oldest queued async task and feed its message to `update`.
    ///
    /// Returns `false` if there was nothing to run.
    pub async fn run_next_task(&mut self) -> bool {
        match self.pending_tasks.pop_front() {
            Some(task) => {
                let msg = task.await;
                self.send(msg);
                self.drain_messages();
                true
            }
            None => false,
        }
    }

    /// Run queued tasks, and any tasks they cause, until the queue is empty.
    pub async fn settle(&mut self) {
        self.drain_messages();
        while self.run_next_task().await {}
    }

    /// Whether any command so far asked the program to quit.
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Get a shared reference to the model for assertions.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Render the model to a ratatui [`Buffer`] of the given dimensions.
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        let backend = ratatui::backend::TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).expect("test backend never fails");
        terminal
            .draw(|frame| {
                self.model.view(frame);
            })
            .expect("test backend never fails");
        terminal.backend().buffer().clone()
    }

    /// Render the model and return the visible content as a plain string,
    /// one line per terminal row.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        let buf = self.render(width, height);
        let area = Rect::new(0, 0, width, height);
        let mut output = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                output.push_str(buf[(x, y)].symbol());
            }
            if y < area.bottom() - 1 {
                output.push('\n');
            }
        }
        output
    }

    fn collect(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Action(Action::Message(msg)) => self.pending_messages.push_back(msg),
            CommandInner::Action(Action::Quit) => self.quit_requested = true,
            CommandInner::Future(fut) => self.pending_tasks.push_back(fut),
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.collect(cmd);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    struct Chain {
        log: Vec<String>,
    }

    #[derive(Debug)]
    enum ChainMsg {
        Start,
        Step(u32),
        Stop,
    }

    impl Model for Chain {
        type Message = ChainMsg;
        type Flags = ();

        fn init(_: ()) -> (Self, Command<ChainMsg>) {
            (Chain { log: vec![] }, Command::none())
        }

        fn update(&mut self, msg: ChainMsg) -> Command<ChainMsg> {
            match msg {
                ChainMsg::Start => {
                    self.log.push("start".into());
                    Command::perform(async { 1 }, ChainMsg::Step)
                }
                ChainMsg::Step(n) if n < 3 => {
                    self.log.push(format!("step {n}"));
                    Command::perform(async move { n + 1 }, ChainMsg::Step)
                }
                ChainMsg::Step(n) => {
                    self.log.push(format!("step {n}"));
                    Command::message(ChainMsg::Stop)
                }
                ChainMsg::Stop => Command::quit(),
            }
        }

        fn view(&self, frame: &mut ratatui::Frame) {
            frame.render_widget(Paragraph::new(self.log.join(", ")), frame.area());
        }
    }

    #[test]
    fn tasks_are_queued_not_run() {
        let mut prog = TestProgram::<Chain>::new(());
        prog.send(ChainMsg::Start);
        assert_eq!(prog.pending_tasks(), 1);
        assert_eq!(prog.model().log, vec!["start"]);
    }

    #[tokio::test]
    async fn run_next_task_runs_one_at_a_time() {
        let mut prog = TestProgram::<Chain>::new(());
        prog.send(ChainMsg::Start);
        assert!(prog.run_next_task().await);
        assert_eq!(prog.model().log, vec!["start", "step 1"]);
        assert_eq!(prog.pending_tasks(), 1);
    }

    #[tokio::test]
    async fn settle_runs_the_whole_chain() {
        let mut prog = TestProgram::<Chain>::new(());
        prog.send(ChainMsg::Start);
        prog.settle().await;
        assert_eq!(prog.model().log, vec!["start", "step 1", "step 2", "step 3"]);
        assert!(prog.quit_requested());
        assert!(!prog.run_next_task().await);
    }

    #[test]
    fn render_string_shows_view() {
        let mut prog = TestProgram::<Chain>::new(());
        prog.send(ChainMsg::Start);
        assert!(prog.render_string(20, 1).starts_with("start"));
    }
}
