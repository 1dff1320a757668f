use crate::cpu::System;
use crate::decoder::decode;
use crate::memory::ExecutableMemory;

/// Snapshot retention policy.
///
/// `Always` keeps the full history of [`System`] states so every
/// intermediate machine state stays inspectable; `Never` overwrites the
/// head in place.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RetainStates {
    Always,
    Never,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct EmulatorSettings {
    /// Bytes reserved behind the executable image for the stack, rounded
    /// up to an even count at load time.
    pub stack_size: u32,
    pub retain_states: RetainStates,
}

impl Default for EmulatorSettings {
    fn default() -> EmulatorSettings {
        EmulatorSettings {
            stack_size: 4 * 1024,
            retain_states: RetainStates::Always,
        }
    }
}

/// The stepping engine.
///
/// The emulator owns an ordered history of [`System`] snapshots; index 0
/// is the pristine empty state and is never popped. `step` decodes one
/// instruction at the head's program counter and either appends the
/// resulting state or replaces the head, per the retention policy.
pub struct Emulator {
    states: Vec<System>,
    settings: EmulatorSettings,
}

impl Emulator {
    pub fn new() -> Emulator {
        Emulator::with_settings(EmulatorSettings::default())
    }

    pub fn with_settings(settings: EmulatorSettings) -> Emulator {
        Emulator {
            states: vec![System::default()],
            settings,
        }
    }

    pub fn states(&self) -> &[System] {
        &self.states[..]
    }

    pub fn settings(&self) -> EmulatorSettings {
        self.settings
    }

    /// Replaces the settings, dropping all but the initial state first.
    pub fn load_settings(&mut self, settings: EmulatorSettings) {
        self.reset();
        self.settings = settings;
    }

    /// Loads a binary image as a fresh state: the executable bytes at
    /// offset 0, the configured stack behind them, `a7` two bytes below
    /// the end of memory and the program counter at the image start.
    pub fn new_state(&mut self, code: &[u8]) {
        let mut mem = ExecutableMemory::from_code(code.to_vec());
        mem.reserve_stack(self.settings.stack_size);

        let mut sys = match self.states.last() {
            Some(last) => last.clone(),
            None => System::default(),
        };
        sys.cpu.program_counter = 0;
        sys.cpu.addr[crate::constants::STACK_POINTER] = if mem.length() >= 2 {
            (mem.length() - 2) as i32
        } else {
            0
        };
        sys.mem = mem;
        self.states.push(sys);
    }

    /// Executes one instruction. Returns `false` without touching the
    /// history when there is nothing to run: empty memory, a program
    /// counter outside the executable region, an illegal opcode, or a
    /// faulting executor.
    pub fn step(&mut self) -> bool {
        let head = match self.states.last() {
            Some(head) => head,
            None => return false,
        };
        if head.mem.is_empty() {
            return false;
        }
        let pc = head.cpu.program_counter;
        if !head.mem.executable.contains(pc) {
            return false;
        }

        let instr = decode(&head.mem, pc);
        if instr.is_illegal() {
            return false;
        }

        // Execute against a scratch copy so a fault never half-applies.
        let mut next = head.clone();
        if (instr.exec)(&mut next, &instr.data).is_err() {
            return false;
        }

        match self.settings.retain_states {
            RetainStates::Always => self.states.push(next),
            RetainStates::Never => {
                if let Some(head) = self.states.last_mut() {
                    *head = next;
                }
            }
        }
        true
    }

    /// Pops the newest snapshot; the initial state always survives.
    pub fn rollback(&mut self) -> bool {
        if self.states.len() > 1 {
            self.states.pop();
            true
        } else {
            false
        }
    }

    /// Pops everything down to the initial state.
    pub fn reset(&mut self) -> bool {
        let mut popped = false;
        while self.states.len() > 1 {
            self.states.pop();
            popped = true;
        }
        popped
    }
}

impl Default for Emulator {
    fn default() -> Emulator {
        Emulator::new()
    }
}

/// Steps until the program leaves the executable region or faults.
pub fn continue_execution(emu: &mut Emulator) {
    while emu.step() {}
}

/// Like [`continue_execution`], but consults `cancelled` between steps so
/// a host can interrupt a runaway program.
pub fn continue_execution_until<F>(emu: &mut Emulator, mut cancelled: F)
where
    F: FnMut() -> bool,
{
    while !cancelled() && emu.step() {}
}
