//! Example dataset substituted when a result cannot be retrieved

use crate::estimate::NormalizedResult;
use serde_json::{json, Value};

/// Version of the built-in example dataset
pub const EXAMPLE_FIXTURE_VERSION: u32 = 1;

/// A versioned result dataset handed out instead of live data
///
/// The poller receives one at construction; tests inject their own.
#[derive(Debug, Clone, PartialEq)]
pub struct Fixture {
    version: u32,
    result: Value,
}

impl Fixture {
    /// Create a fixture from an arbitrary `result` value
    pub fn new(version: u32, result: Value) -> Self {
        Self { version, result }
    }

    /// The built-in example estimation
    pub fn example() -> Self {
        Self::new(EXAMPLE_FIXTURE_VERSION, example_result())
    }

    /// Fixture version
    pub fn version(&self) -> u32 {
        self.version
    }

    /// The `result` payload
    pub fn result(&self) -> &Value {
        &self.result
    }

    /// Wrap the payload as a result document (`{"result": ...}`)
    pub fn document(&self) -> Value {
        json!({ "result": self.result })
    }

    /// Structured view of the payload
    pub fn normalized(&self) -> NormalizedResult {
        NormalizedResult::from_value(&self.result).unwrap_or_default()
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::example()
    }
}

fn example_result() -> Value {
    json!({
        "refined_requirements": {
            "epics": [
                {
                    "name": "Autenticação e Autorização",
                    "description": "Sistema completo de login, cadastro e gestão de permissões de usuários",
                    "priority": "Alta",
                    "risk_factors": ["Integração com sistemas externos", "Conformidade LGPD", "Segurança de dados"]
                },
                {
                    "name": "Dashboard Principal",
                    "description": "Interface principal com métricas, gráficos e visão geral do sistema",
                    "priority": "Alta",
                    "risk_factors": ["Performance com grandes volumes de dados", "Responsividade"]
                },
                {
                    "name": "Módulo de Relatórios",
                    "description": "Geração e exportação de relatórios customizáveis",
                    "priority": "Média",
                    "risk_factors": ["Complexidade das consultas", "Tempo de processamento"]
                }
            ]
        },
        "risk_analysis": {
            "identified_risks": [
                "Dependência de APIs externas pode causar instabilidade",
                "Complexidade da arquitetura pode impactar prazos",
                "Necessidade de testes extensivos de segurança"
            ],
            "mitigation_strategies": [
                "Implementar fallbacks e cache para APIs externas",
                "Documentação técnica detalhada e code review",
                "Testes automatizados de segurança e penetração"
            ],
            "impact_on_timeline": "Risco médio pode adicionar 15-20% ao cronograma previsto"
        },
        "tasks": [
            {
                "id": "T001",
                "name": "Configuração do Ambiente de Desenvolvimento",
                "description": "Setup inicial do projeto, configuração de dependências e estrutura base",
                "epic": "Autenticação e Autorização",
                "estimated_points": 5,
                "complexity": "Baixa",
                "risk_level": "Baixo",
                "dependencies": [],
                "considerations": "Definir padrões de desenvolvimento e estrutura de pastas"
            },
            {
                "id": "T002",
                "name": "Sistema de Login e Cadastro",
                "description": "Implementação das telas e lógica de autenticação de usuários",
                "epic": "Autenticação e Autorização",
                "estimated_points": 13,
                "complexity": "Média",
                "risk_level": "Médio",
                "dependencies": ["T001"],
                "considerations": "Integração com OAuth e validação de email"
            },
            {
                "id": "T003",
                "name": "Dashboard com Métricas",
                "description": "Desenvolvimento da tela principal com gráficos e indicadores",
                "epic": "Dashboard Principal",
                "estimated_points": 21,
                "complexity": "Alta",
                "risk_level": "Alto",
                "dependencies": ["T002"],
                "considerations": "Otimização de performance para grandes datasets"
            }
        ],
        "work_plan": {
            "phases": [
                {
                    "name": "Fase 1 - Setup e Autenticação",
                    "tasks": ["T001", "T002"],
                    "estimated_duration": "3 semanas",
                    "deliverables": ["Ambiente configurado", "Sistema de login funcional"],
                    "critical_points": ["Definição da arquitetura", "Integração com OAuth"]
                },
                {
                    "name": "Fase 2 - Dashboard e Core Features",
                    "tasks": ["T003"],
                    "estimated_duration": "4 semanas",
                    "deliverables": ["Dashboard principal", "Métricas em tempo real"],
                    "critical_points": ["Performance dos gráficos", "Responsividade"]
                }
            ],
            "total_estimated_points": 39,
            "estimated_duration": "7 semanas",
            "buffer_percentage": 20,
            "milestones": [
                {
                    "name": "MVP Funcional",
                    "date": "Semana 4",
                    "deliverable": "Sistema básico com autenticação e dashboard"
                },
                {
                    "name": "Versão Beta",
                    "date": "Semana 7",
                    "deliverable": "Sistema completo com todos os módulos"
                }
            ]
        }
    })
}
