#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Reader,
    Navigation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Command {
    Exit,
    ToggleHelp,
    CloseHelp,
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    OpenNavigation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    Continue,
    Exit,
}
