pub mod auth;
pub mod health;
pub mod tags;
pub mod tasks;
pub mod users;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::login)
            .service(auth::register),
    )
    .service(
        web::scope("/users")
            .service(users::get_profile)
            .service(users::update_profile)
            .service(users::delete_account),
    )
    .service(
        web::scope("/tasks")
            .service(tasks::get_tasks)
            .service(tasks::create_task)
            .service(tasks::get_task)
            .service(tasks::update_task)
            .service(tasks::delete_task),
    )
    .service(
        web::scope("/tags")
            .service(tags::get_tags)
            .service(tags::create_tag)
            .service(tags::attach_tag)
            .service(tags::detach_tag)
            .service(tags::get_tag)
            .service(tags::update_tag)
            .service(tags::delete_tag),
    );
}
