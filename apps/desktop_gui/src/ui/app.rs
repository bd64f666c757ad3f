use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{Field, Gender, MaritalStatus, Step};
use wizard_core::{DocumentAsset, PhotoAsset, RegistrationWizard, SelectionError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::{apply_ui_event, ScreenState};
use crate::ui::preview::PhotoPreviewCache;
use crate::ui::widgets::{error_banner, field_input, human_readable_bytes, inline_error, step_trail};

const PHOTO_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

pub struct RegistrationApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    screen: ScreenState,
    photo_preview: PhotoPreviewCache,
}

impl RegistrationApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            screen: ScreenState::new(RegistrationWizard::default()),
            photo_preview: PhotoPreviewCache::default(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            apply_ui_event(&mut self.screen, event);
        }
    }

    fn text_row(&mut self, ui: &mut egui::Ui, field: Field, id: &'static str, hint: &str) {
        let current = self.screen.wizard.draft().text(field).unwrap_or_default().to_string();
        if let Some(updated) = field_input(ui, id, field.label(), hint, &current) {
            self.screen.wizard.set_text(field, updated);
        }
    }

    fn show_identity_step(&mut self, ui: &mut egui::Ui) {
        ui.columns(2, |columns| {
            self.text_row(&mut columns[0], Field::FirstName, "identity_first_name", "Jean");
            self.text_row(&mut columns[1], Field::LastName, "identity_last_name", "Mukendi");
        });

        ui.add_space(6.0);
        ui.columns(2, |columns| {
            let ui = &mut columns[0];
            ui.label(egui::RichText::new("Sexe").strong());
            let mut gender = self.screen.wizard.draft().gender;
            egui::ComboBox::from_id_salt("identity_gender")
                .selected_text(gender.label())
                .show_ui(ui, |ui| {
                    for option in Gender::ALL {
                        ui.selectable_value(&mut gender, option, option.label());
                    }
                });
            if gender != self.screen.wizard.draft().gender {
                self.screen.wizard.set_gender(gender);
            }

            let ui = &mut columns[1];
            ui.label(egui::RichText::new("État civil").strong());
            let mut marital = self.screen.wizard.draft().marital_status;
            egui::ComboBox::from_id_salt("identity_marital_status")
                .selected_text(marital.as_str())
                .show_ui(ui, |ui| {
                    for option in MaritalStatus::ALL {
                        ui.selectable_value(&mut marital, option, option.as_str());
                    }
                });
            if marital != self.screen.wizard.draft().marital_status {
                self.screen.wizard.set_marital_status(marital);
            }
        });

        ui.add_space(6.0);
        ui.columns(2, |columns| {
            self.text_row(&mut columns[0], Field::BirthDate, "identity_birth_date", "2005-08-14");
            self.text_row(&mut columns[1], Field::BirthPlace, "identity_birth_place", "Kinshasa");
        });
        ui.add_space(6.0);
        ui.columns(2, |columns| {
            self.text_row(&mut columns[0], Field::Phone, "identity_phone", "+243 ...");
            self.text_row(&mut columns[1], Field::Email, "identity_email", "nom@exemple.com");
        });
    }

    fn show_academic_step(&mut self, ui: &mut egui::Ui) {
        self.text_row(
            ui,
            Field::PreviousSchool,
            "academic_previous_school",
            "Nom du lycée ou de l'institut",
        );
        ui.add_space(6.0);

        let selected_faculty = self
            .screen
            .wizard
            .draft()
            .text(Field::TargetFaculty)
            .map(str::to_string);
        let mut faculty_choice = selected_faculty.clone();
        ui.label(egui::RichText::new(Field::TargetFaculty.label()).strong());
        egui::ComboBox::from_id_salt("academic_faculty")
            .width(ui.available_width())
            .selected_text(faculty_choice.as_deref().unwrap_or("Choisir une faculté..."))
            .show_ui(ui, |ui| {
                for faculty in self.screen.wizard.catalog().faculties() {
                    ui.selectable_value(
                        &mut faculty_choice,
                        Some(faculty.name.clone()),
                        faculty.name.as_str(),
                    );
                }
            });
        if faculty_choice != selected_faculty {
            if let Some(faculty) = faculty_choice {
                self.screen.wizard.set_text(Field::TargetFaculty, faculty);
            }
        }

        ui.add_space(6.0);
        let selected_department = self
            .screen
            .wizard
            .draft()
            .text(Field::TargetDepartment)
            .map(str::to_string);
        let mut department_choice = selected_department.clone();
        let departments = self.screen.wizard.available_departments().to_vec();
        ui.label(egui::RichText::new(Field::TargetDepartment.label()).strong());
        ui.add_enabled_ui(self.screen.wizard.department_selection_enabled(), |ui| {
            egui::ComboBox::from_id_salt("academic_department")
                .width(ui.available_width())
                .selected_text(
                    department_choice
                        .as_deref()
                        .unwrap_or("Choisir un département..."),
                )
                .show_ui(ui, |ui| {
                    for department in &departments {
                        ui.selectable_value(
                            &mut department_choice,
                            Some(department.clone()),
                            department.as_str(),
                        );
                    }
                });
        });
        if department_choice != selected_department {
            if let Some(department) = department_choice {
                self.screen.wizard.set_text(Field::TargetDepartment, department);
            }
        }
    }

    fn show_documents_step(&mut self, ui: &mut egui::Ui) {
        let busy = self.screen.wizard.is_submitting();

        ui.label(egui::RichText::new("Photo passeport (obligatoire, 5Mo max)").strong());
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!busy, egui::Button::new("Choisir une photo..."))
                .clicked()
            {
                self.pick_photo();
            }
            match &self.screen.wizard.draft().photo {
                Some(photo) => {
                    ui.label(format!(
                        "{} ({})",
                        photo.file_name,
                        human_readable_bytes(photo.size_bytes())
                    ));
                }
                None => {
                    ui.weak("Aucune photo sélectionnée");
                }
            }
        });
        match &self.screen.wizard.draft().photo {
            Some(photo) => self.photo_preview.show(ui, &photo.file_name, &photo.bytes),
            None => self.photo_preview.clear(),
        }

        ui.add_space(10.0);
        ui.label(egui::RichText::new("Autres documents (diplômes, relevés...)").strong());
        if ui
            .add_enabled(!busy, egui::Button::new("Ajouter des documents..."))
            .clicked()
        {
            self.pick_documents();
        }
        for document in &self.screen.wizard.draft().documents {
            ui.horizontal(|ui| {
                ui.label(document.file_name.as_str());
                ui.weak(human_readable_bytes(document.size_bytes));
            });
        }
    }

    fn show_confirmation(&mut self, ui: &mut egui::Ui) {
        let Some(summary) = self.screen.wizard.confirmation_summary() else {
            return;
        };
        ui.vertical_centered(|ui| {
            ui.add_space(24.0);
            ui.heading("Pré-inscription Enregistrée !");
            ui.add_space(8.0);
            ui.label(format!(
                "Merci {}. Votre dossier pour la faculté de {} a été transmis avec succès.",
                summary.applicant_name, summary.program
            ));
            ui.add_space(16.0);
            if ui.button("Nouvelle Inscription").clicked() {
                self.screen.restart();
            }
        });
    }

    fn pick_photo(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &PHOTO_EXTENSIONS)
            .pick_file()
        else {
            return;
        };

        let selection =
            PhotoAsset::from_path(&path).and_then(|photo| self.screen.wizard.select_photo(photo));
        match selection {
            Ok(()) => {
                self.screen.status = format!("Photo sélectionnée: {}", path.display());
            }
            Err(err @ SelectionError::PhotoTooLarge { .. }) => {
                tracing::warn!("rejected passport photo '{}': {err}", path.display());
                let _ = rfd::MessageDialog::new()
                    .set_level(rfd::MessageLevel::Warning)
                    .set_title("Photo trop volumineuse")
                    .set_description(err.to_string())
                    .set_buttons(rfd::MessageButtons::Ok)
                    .show();
            }
            Err(err) => {
                tracing::warn!("could not read passport photo: {err}");
                self.screen.status = err.to_string();
            }
        }
    }

    fn pick_documents(&mut self) {
        let Some(paths) = rfd::FileDialog::new().pick_files() else {
            return;
        };

        let documents = paths
            .iter()
            .map(|path| DocumentAsset::from_path(path))
            .collect::<Result<Vec<_>, _>>();
        let count = documents.as_ref().map_or(0, Vec::len);
        match documents.and_then(|documents| self.screen.wizard.select_documents(documents)) {
            Ok(()) => {
                self.screen.status = format!("{count} document(s) sélectionné(s)");
            }
            Err(err) => {
                tracing::warn!("supporting documents not selected: {err}");
                self.screen.status = err.to_string();
            }
        }
    }

    fn submit(&mut self) {
        let draft = match self.screen.wizard.begin_submission() {
            Ok(draft) => draft.clone(),
            Err(err) => {
                self.screen.step_error = Some(err.to_string());
                return;
            }
        };
        self.screen.step_error = None;
        self.screen.status = "Envoi du dossier...".to_string();

        let mut failure = String::new();
        if !dispatch_backend_command(&self.cmd_tx, BackendCommand::Submit { draft }, &mut failure)
        {
            self.screen.wizard.abandon_submission(failure.clone());
            self.screen.status = failure;
        }
    }

    fn show_navigation(&mut self, ui: &mut egui::Ui) {
        let step = self.screen.wizard.step();
        let busy = self.screen.wizard.is_submitting();

        ui.horizontal(|ui| {
            if step != Step::Identity
                && ui
                    .add_enabled(!busy, egui::Button::new("Retour"))
                    .clicked()
            {
                self.screen.retreat();
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if step == Step::Documents {
                    let button = egui::Button::new(
                        egui::RichText::new("Soumettre le dossier").strong(),
                    )
                    .min_size(egui::vec2(180.0, 34.0));
                    if ui
                        .add_enabled(self.screen.wizard.can_submit(), button)
                        .clicked()
                    {
                        self.submit();
                    }
                    if busy {
                        ui.spinner();
                    }
                } else {
                    let button = egui::Button::new(egui::RichText::new("Suivant").strong())
                        .min_size(egui::vec2(140.0, 34.0));
                    if ui.add(button).clicked() {
                        self.screen.advance();
                    }
                }
            });
        });
    }

    fn show_wizard(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.small("Statut:");
                ui.small(egui::RichText::new(&self.screen.status).weak());
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let card_width = ui.available_width().clamp(480.0, 720.0);
            ui.vertical_centered(|ui| {
                ui.set_width(card_width);
                ui.add_space(12.0);
                ui.heading("Portail Admission");
                ui.weak("Pré-inscription UPG");
                ui.add_space(10.0);

                let step = self.screen.wizard.step();
                if step == Step::Confirmation {
                    self.show_confirmation(ui);
                    return;
                }

                step_trail(ui, step);
                ui.add_space(8.0);
                if let Some(message) = self.screen.wizard.error_feedback() {
                    error_banner(ui, message);
                    ui.add_space(8.0);
                }

                egui::Frame::NONE
                    .fill(ui.visuals().faint_bg_color.gamma_multiply(0.55))
                    .corner_radius(12.0)
                    .inner_margin(egui::Margin::symmetric(14, 12))
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new(step.title()).strong().size(20.0));
                        ui.add_space(6.0);
                        match step {
                            Step::Identity => self.show_identity_step(ui),
                            Step::Academic => self.show_academic_step(ui),
                            Step::Documents => self.show_documents_step(ui),
                            Step::Confirmation => {}
                        }
                    });

                if let Some(message) = self.screen.step_error.as_deref() {
                    ui.add_space(6.0);
                    inline_error(ui, message);
                }

                ui.add_space(10.0);
                self.show_navigation(ui);
            });
        });
    }
}

impl eframe::App for RegistrationApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.show_wizard(ctx);

        if self.screen.wizard.is_submitting() {
            ctx.request_repaint_after(std::time::Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
