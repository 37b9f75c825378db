use crate::config::Config;
use crate::file_picker::interface::FilePicker;
use crate::fire_detection::core::{init, transition, Effect, Event, State};
use crate::fire_detection::render::Render;
use crate::fire_detection::run_effect::RunEffect;
use crate::library::logger::interface::Logger;
use crate::library::state_machine::StateMachine;
use crate::prediction_client::interface::PredictionClient;
use crate::upload::selected_file::FileCandidate;
use eframe::egui;
use std::sync::Arc;

pub struct FireDetectionApp {
    logger: Arc<dyn Logger + Send + Sync>,
    machine: StateMachine<State, Event, Effect>,
    run_effect: RunEffect,
    render: Render,
}

impl FireDetectionApp {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        prediction_client: Arc<dyn PredictionClient + Send + Sync>,
        file_picker: Arc<dyn FilePicker + Send + Sync>,
    ) -> Self {
        let transition_config = config.clone();
        let (machine, effects) = StateMachine::new(init(&config), move |state, event| {
            transition(&transition_config, state, event)
        });

        let run_effect = RunEffect::new(
            config.clone(),
            logger.clone(),
            prediction_client,
            file_picker,
            machine.sender(),
        );

        let mut app = Self {
            logger: logger.with_namespace("fire_detection"),
            machine,
            run_effect,
            render: Render::new(config),
        };

        app.run_effects(effects);

        app
    }

    pub fn state(&self) -> &State {
        self.machine.state()
    }

    pub fn dispatch(&mut self, event: Event) {
        let _ = self.logger.info(&format!("event: {:?}", event));

        let effects = self.machine.dispatch(event);

        let _ = self.logger.info(&format!(
            "result: {:?}, in flight: {:?}, effects: [{}]",
            self.machine.state().result,
            self.machine.state().in_flight,
            effects
                .iter()
                .map(Effect::to_display_string)
                .collect::<Vec<_>>()
                .join(", ")
        ));

        self.run_effects(effects);
    }

    fn run_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            if effect.is_view_local() {
                self.render.apply(&effect);
            } else {
                self.run_effect.spawn(effect);
            }
        }
    }

    /// Turns window-level input (file hover, drops, Esc) into events.
    pub fn input_events(&self, ctx: &egui::Context) -> Vec<Event> {
        let (hovering, dropped, escape) = ctx.input(|i| {
            (
                !i.raw.hovered_files.is_empty(),
                i.raw.dropped_files.clone(),
                i.key_pressed(egui::Key::Escape),
            )
        });

        let mut events = vec![];

        if hovering != self.state().drag_hover {
            events.push(Event::DragHovered(hovering));
        }

        if let Some(file) = dropped.first() {
            if let Some(bytes) = &file.bytes {
                let candidate = FileCandidate::new(&file.name, Some(file.mime.as_str()), Arc::clone(bytes));
                events.push(Event::FileLoaded(Ok(candidate)));
            } else if let Some(path) = &file.path {
                events.push(Event::FileDropped(path.clone()));
            }
        }

        if escape {
            events.push(Event::EscapePressed);
        }

        events
    }
}

impl eframe::App for FireDetectionApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for event in self.machine.pending_events() {
            self.dispatch(event);
        }

        let mut events = self.input_events(ctx);
        events.extend(self.render.render(ctx, self.machine.state()));

        for event in events {
            self.dispatch(event);
        }

        // Background particles never stop moving.
        ctx.request_repaint();
    }
}
