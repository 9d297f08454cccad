//! Small wire-level enums shared between state and command messages. Each
//! round-trips through a plain `u32` on the wire; `from_u32` defaults to the
//! first variant for an out-of-range value rather than failing the whole
//! message decode over one stray enum byte.

macro_rules! wire_enum {
    ($name:ident { $($variant:ident = $value:expr),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub enum $name {
            #[default]
            $($variant),+
        }

        impl $name {
            pub fn from_u32(v: u32) -> Self {
                match v {
                    $($value => Self::$variant,)+
                    _ => Self::default(),
                }
            }

            pub fn as_u32(self) -> u32 {
                match self {
                    $(Self::$variant => $value),+
                }
            }
        }
    };
}

wire_enum!(CoverOperation {
    Idle = 0,
    IsOpening = 1,
    IsClosing = 2,
});

wire_enum!(FanDirection {
    Forward = 0,
    Reverse = 1,
});

wire_enum!(LockEntityState {
    None = 0,
    Locked = 1,
    Unlocked = 2,
    Jammed = 3,
    Locking = 4,
    Unlocking = 5,
});

wire_enum!(LockCommand {
    Lock = 0,
    Unlock = 1,
    Open = 2,
});

wire_enum!(MediaPlayerState {
    None = 0,
    Idle = 1,
    Playing = 2,
    Paused = 3,
});

wire_enum!(MediaPlayerCommand {
    Play = 0,
    Pause = 1,
    Stop = 2,
    Mute = 3,
    Unmute = 4,
});

wire_enum!(ClimateMode {
    Off = 0,
    HeatCool = 1,
    Cool = 2,
    Heat = 3,
    FanOnly = 4,
    Dry = 5,
    Auto = 6,
});

wire_enum!(ClimateAction {
    Off = 0,
    Cooling = 1,
    Heating = 2,
    Idle = 3,
    Drying = 4,
    Fan = 5,
});

wire_enum!(ClimateFanMode {
    On = 0,
    Off = 1,
    Auto = 2,
    Low = 3,
    Medium = 4,
    High = 5,
    Middle = 6,
    Focus = 7,
    Diffuse = 8,
    Quiet = 9,
});

wire_enum!(ClimateSwingMode {
    Off = 0,
    Both = 1,
    Vertical = 2,
    Horizontal = 3,
});

wire_enum!(ClimatePreset {
    None = 0,
    Home = 1,
    Away = 2,
    Boost = 3,
    Comfort = 4,
    Eco = 5,
    Sleep = 6,
    Activity = 7,
});

wire_enum!(AlarmControlPanelState {
    Disarmed = 0,
    ArmedHome = 1,
    ArmedAway = 2,
    ArmedNight = 3,
    ArmedVacation = 4,
    ArmedCustomBypass = 5,
    Pending = 6,
    Arming = 7,
    Disarming = 8,
    Triggered = 9,
});

wire_enum!(AlarmControlPanelCommand {
    Disarm = 0,
    ArmAway = 1,
    ArmHome = 2,
    ArmNight = 3,
    ArmVacation = 4,
    ArmCustomBypass = 5,
    Trigger = 6,
});

wire_enum!(ValveOperation {
    Idle = 0,
    IsOpening = 1,
    IsClosing = 2,
});

wire_enum!(UpdateCommand {
    None = 0,
    Update = 1,
    Check = 2,
});
