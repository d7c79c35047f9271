//! Fire-and-forget sound effects.
//!
//! Gameplay writes `SoundCue`s; only the full app installs `playback_plugin`, so headless
//! runs simply let the cues age out.

use bevy::prelude::*;

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    ProjectileImpact,
}

pub fn plugin(app: &mut App) {
    app.add_message::<SoundCue>();
}

/// Render-side playback. Requires the asset server and the audio output.
pub fn playback_plugin(app: &mut App) {
    app.add_systems(Startup, load_sounds)
        .add_systems(Update, play_sound_cues);
}

#[derive(Resource, Debug)]
struct SoundHandles {
    projectile_impact: Handle<AudioSource>,
}

impl SoundHandles {
    fn get(&self, cue: SoundCue) -> Handle<AudioSource> {
        match cue {
            SoundCue::ProjectileImpact => self.projectile_impact.clone(),
        }
    }
}

fn load_sounds(mut commands: Commands, assets: Res<AssetServer>) {
    commands.insert_resource(SoundHandles {
        projectile_impact: assets.load("sounds/projectile_impact.ogg"),
    });
}

fn play_sound_cues(
    mut commands: Commands,
    mut cues: MessageReader<SoundCue>,
    handles: Option<Res<SoundHandles>>,
) {
    let Some(handles) = handles else {
        cues.clear();
        return;
    };

    for &cue in cues.read() {
        commands.spawn((AudioPlayer::new(handles.get(cue)), PlaybackSettings::DESPAWN));
    }
}
