use std::net::TcpListener;

use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};

use crate::{
    configuration::AnalysisSettings,
    routes::{analyze_resume_route, analyze_route, extract_urls_route, health_check_route},
    services::Analyzer,
};

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check_route::health_check).service(
        web::scope("/api")
            .service(analyze_resume_route::analyze_resume)
            .service(analyze_route::analyze)
            .service(extract_urls_route::extract_urls),
    );
}

pub fn run(
    listener: TcpListener,
    analyzer: Analyzer,
    analysis_settings: AnalysisSettings,
    max_body_bytes: usize,
) -> Result<Server, std::io::Error> {
    let analyzer = web::Data::new(analyzer);
    let analysis_settings = web::Data::new(analysis_settings);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .configure(routes)
            .app_data(web::PayloadConfig::new(max_body_bytes))
            .app_data(analyzer.clone())
            .app_data(analysis_settings.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
